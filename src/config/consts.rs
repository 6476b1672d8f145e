// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.openrice.com";
pub const LISTING_URL_TMPL: &str = "https://www.openrice.com/api/v1/pois?uiLang=en&uiCity=hongkong&seoCategory=&callName=&sortBy=ORScoreDesc&districtId={geo}&cuisineId={category}&tabIndex=0&tabType=&page={page}";
pub const PAGE_PLACEHOLDER: &str = "{page}";
pub const GEO_PLACEHOLDER: &str = "{geo}";
pub const CATEGORY_PLACEHOLDER: &str = "{category}";
pub const USER_AGENT: &str = concat!("venue_scrape/", env!("CARGO_PKG_VERSION"));
pub const CONNECT_TIMEOUT_SECS: u64 = 15;

// Scheduling
pub const BATCH_SIZE: usize = 15;
pub const MAX_PAGES: u32 = 500; // runaway-pagination cap per target

// Local files
pub const DEBUG_LOG: &str = ".store/debug.log";
pub const VENUES_LOG: &str = "restaurants.ndjson";
pub const REVIEWS_LOG: &str = "restaurantReviews.ndjson";
pub const MATRIX_CSV: &str = "userItemMatrix.csv";
pub const AXES_FILE: &str = "axes.toml";
