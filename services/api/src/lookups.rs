use serde::Serialize;

/// A labelled group of filter values shown together in a picker.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct LookupGroup {
    pub(crate) label: &'static str,
    pub(crate) values: &'static [&'static str],
}

/// A preset for the MRT distance slider; `max_km` of `None` means no limit.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct DistanceStep {
    pub(crate) max_km: Option<f64>,
    pub(crate) label: &'static str,
    pub(crate) walk: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Lookups {
    pub(crate) regions: &'static [LookupGroup],
    pub(crate) storey_groups: &'static [LookupGroup],
    pub(crate) flat_model_categories: &'static [LookupGroup],
    pub(crate) mrt_distance_steps: &'static [DistanceStep],
}

const REGIONS: &[LookupGroup] = &[
    LookupGroup {
        label: "North",
        values: &["WOODLANDS", "YISHUN", "SEMBAWANG"],
    },
    LookupGroup {
        label: "North-East",
        values: &["SENGKANG", "PUNGGOL", "HOUGANG", "SERANGOON", "ANG MO KIO"],
    },
    LookupGroup {
        label: "East",
        values: &["TAMPINES", "BEDOK", "PASIR RIS"],
    },
    LookupGroup {
        label: "West",
        values: &[
            "JURONG WEST",
            "JURONG EAST",
            "BUKIT BATOK",
            "BUKIT PANJANG",
            "CHOA CHU KANG",
            "CLEMENTI",
        ],
    },
    LookupGroup {
        label: "Central",
        values: &[
            "BISHAN",
            "TOA PAYOH",
            "KALLANG/WHAMPOA",
            "BUKIT MERAH",
            "QUEENSTOWN",
            "GEYLANG",
            "MARINE PARADE",
            "CENTRAL AREA",
            "BUKIT TIMAH",
        ],
    },
];

const STOREY_GROUPS: &[LookupGroup] = &[
    LookupGroup {
        label: "Low",
        values: &["01 TO 03", "04 TO 06"],
    },
    LookupGroup {
        label: "Medium",
        values: &["07 TO 09", "10 TO 12", "13 TO 15", "16 TO 18"],
    },
    LookupGroup {
        label: "High",
        values: &[
            "19 TO 21", "22 TO 24", "25 TO 27", "28 TO 30", "31 TO 33", "34 TO 36", "37 TO 39",
            "40 TO 42", "43 TO 45", "46 TO 48", "49 TO 51",
        ],
    },
];

const FLAT_MODEL_CATEGORIES: &[LookupGroup] = &[
    LookupGroup {
        label: "Standard/Mainstream",
        values: &[
            "Model A",
            "Improved",
            "New Generation",
            "Simplified",
            "Apartment",
            "Standard",
            "Model A2",
            "Type S1",
            "Type S2",
        ],
    },
    LookupGroup {
        label: "Premium & DBSS",
        values: &[
            "Premium Apartment",
            "DBSS",
            "Premium Apartment Loft",
            "Premium Maisonette",
        ],
    },
    LookupGroup {
        label: "Maisonette/Multi-gen/Adj.",
        values: &[
            "Maisonette",
            "Model A-Maisonette",
            "Improved-Maisonette",
            "Adjoined flat",
            "Multi Generation",
            "3Gen",
        ],
    },
    LookupGroup {
        label: "Special",
        values: &["Terrace", "2-room"],
    },
];

const MRT_DISTANCE_STEPS: &[DistanceStep] = &[
    DistanceStep {
        max_km: Some(0.5),
        label: "Very Close (within 500m)",
        walk: "~5-7 min walk",
    },
    DistanceStep {
        max_km: Some(1.0),
        label: "Walkable (within 1km)",
        walk: "~10-12 min walk",
    },
    DistanceStep {
        max_km: Some(1.5),
        label: "Long Walk (within 1.5km)",
        walk: "~15-18 min walk",
    },
    DistanceStep {
        max_km: Some(2.0),
        label: "Accessible (within 2km)",
        walk: "~20-25 min walk",
    },
    DistanceStep {
        max_km: None,
        label: "Any Distance",
        walk: "No MRT filter",
    },
];

pub(crate) const LOOKUPS: Lookups = Lookups {
    regions: REGIONS,
    storey_groups: STOREY_GROUPS,
    flat_model_categories: FLAT_MODEL_CATEGORIES,
    mrt_distance_steps: MRT_DISTANCE_STEPS,
};
