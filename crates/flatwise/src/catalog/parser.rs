use super::unit::{Unit, UnitId, UnitRejection};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

#[derive(Debug, Default)]
pub(crate) struct ParsedCatalog {
    pub(crate) units: Vec<Unit>,
    pub(crate) skipped_rows: usize,
}

pub(crate) fn parse_units<R: Read>(reader: R) -> Result<ParsedCatalog, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut parsed = ParsedCatalog::default();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = index + 2;
        let id = UnitId(parsed.units.len() as u32);

        match row.into_unit(id) {
            Ok(unit) => parsed.units.push(unit),
            Err(rejection) => {
                warn!(line, %rejection, "skipping catalog row");
                parsed.skipped_rows += 1;
            }
        }
    }

    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    town: String,
    flat_type: String,
    block: String,
    street_name: String,
    storey_range: String,
    floor_area_sqm: f64,
    flat_model: String,
    resale_price: f64,
    remaining_lease_years: f64,
    #[serde(default, deserialize_with = "blank_or_nan_as_none")]
    dist_mrt_km: Option<f64>,
}

impl CatalogRow {
    fn into_unit(self, id: UnitId) -> Result<Unit, UnitRejection> {
        for (field, value) in [
            ("town", &self.town),
            ("flat_type", &self.flat_type),
            ("block", &self.block),
            ("street_name", &self.street_name),
            ("flat_model", &self.flat_model),
        ] {
            if value.trim().is_empty() {
                return Err(UnitRejection::MissingField(field));
            }
        }

        let unit = Unit {
            id,
            block: self.block,
            street_name: self.street_name,
            town: self.town,
            flat_type: self.flat_type,
            flat_model: self.flat_model,
            storey_range: self.storey_range,
            resale_price: whole_price(self.resale_price)?,
            floor_area_sqm: self.floor_area_sqm,
            remaining_lease_years: self.remaining_lease_years,
            dist_mrt_km: self.dist_mrt_km,
        };
        unit.check_invariants()?;
        Ok(unit)
    }
}

fn whole_price(raw: f64) -> Result<u32, UnitRejection> {
    if !raw.is_finite() || raw > u32::MAX as f64 {
        return Err(UnitRejection::PriceOutOfRange(raw));
    }
    if raw <= 0.0 {
        return Err(UnitRejection::NonPositivePrice);
    }
    Ok(raw.round() as u32)
}

fn blank_or_nan_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) if raw.eq_ignore_ascii_case("nan") => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|err| serde::de::Error::custom(format!("invalid dist_mrt_km '{raw}': {err}"))),
    }
}
