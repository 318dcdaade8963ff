use clap::Args;
use flatwise::catalog::CatalogLoader;
use flatwise::error::AppError;
use flatwise::recommend::{
    recommend, ConstraintSet, Priority, RecommendRequest, RecommendationPage, SortKey,
    DEFAULT_PAGE_SIZE,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Processed resale export to rank
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Highest acceptable resale price
    #[arg(long)]
    pub(crate) max_price: Option<i64>,
    /// Fewest acceptable remaining lease years
    #[arg(long)]
    pub(crate) min_lease: Option<i64>,
    /// Town to include (repeatable)
    #[arg(long)]
    pub(crate) town: Vec<String>,
    /// Flat type to include, e.g. "4 ROOM" (repeatable)
    #[arg(long)]
    pub(crate) flat_type: Vec<String>,
    /// Storey range to include, e.g. "07 TO 09" (repeatable)
    #[arg(long)]
    pub(crate) storey: Vec<String>,
    /// Flat model to include (repeatable)
    #[arg(long)]
    pub(crate) flat_model: Vec<String>,
    /// Furthest acceptable distance to an MRT station, in km
    #[arg(long)]
    pub(crate) max_mrt: Option<f64>,
    /// Dimension to weight most heavily
    #[arg(long, default_value = "balanced", value_parser = parse_priority)]
    pub(crate) priority: Priority,
    /// Result ordering
    #[arg(long, default_value = "recommended", value_parser = parse_sort)]
    pub(crate) sort: SortKey,
    /// 1-based page to print
    #[arg(long, default_value_t = 1)]
    pub(crate) page: i64,
    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) page_size: usize,
    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::parse(raw).ok_or_else(|| {
        format!("unknown priority '{raw}' (expected price, floor_area, lease, mrt or balanced)")
    })
}

fn parse_sort(raw: &str) -> Result<SortKey, String> {
    SortKey::parse(raw).ok_or_else(|| {
        format!(
            "unknown sort '{raw}' (expected recommended, price-asc, price-desc, area-desc, storey-desc or mrt-asc)"
        )
    })
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

impl RecommendArgs {
    fn request(&self) -> RecommendRequest {
        let constraints = ConstraintSet {
            max_price: self.max_price,
            min_remaining_lease: self.min_lease,
            max_mrt_distance: self.max_mrt,
            towns: non_empty(self.town.clone()),
            flat_types: non_empty(self.flat_type.clone()),
            storey_ranges: non_empty(self.storey.clone()),
            flat_models: non_empty(self.flat_model.clone()),
        };

        RecommendRequest::new(constraints, self.priority)
            .with_sort(self.sort)
            .with_page(self.page)
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let snapshot = CatalogLoader::from_path(&args.catalog)?;
    let page = recommend(&snapshot, &args.request(), args.page_size)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&page).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        let status = snapshot.status();
        println!(
            "Catalog {} ({} units, {} rows skipped, snapshot {})",
            status.source, status.units, status.skipped_rows, status.snapshot_version
        );
        println!(
            "Priority {} | sort {}",
            args.priority.label(),
            args.sort.label()
        );
        print!("{}", render_page(&page));
    }

    Ok(())
}

pub(crate) fn render_page(page: &RecommendationPage) -> String {
    let mut out = String::new();
    let first = (page.page - 1) * page.page_size + 1;

    if page.recommendations.is_empty() {
        out.push_str(&format!(
            "\nNo flats on page {} ({} matched)\n",
            page.page, page.total_found
        ));
        return out;
    }

    out.push_str(&format!(
        "\nShowing {}-{} of {} matches\n",
        first,
        first + page.recommendations.len() - 1,
        page.total_found
    ));
    for view in &page.recommendations {
        let distance = view
            .dist_mrt_km
            .map(|km| format!("{km:.2} km to MRT"))
            .unwrap_or_else(|| "MRT distance unknown".to_string());
        out.push_str(&format!(
            "{:>3}. [{:>5.2}] Blk {} {}, {} | {} {} | {} | {:.0} sqm | ${} | {:.1} yrs lease | {}\n",
            view.rank,
            view.score,
            view.block,
            view.street_name,
            view.town,
            view.flat_type,
            view.flat_model,
            view.storey_range,
            view.floor_area_sqm,
            view.resale_price,
            view.remaining_lease_years,
            distance
        ));
        out.push_str(&format!("     {}\n", view.insight_summary.text));
    }

    out
}
