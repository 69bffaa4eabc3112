//! Symbol casing for generated C identifiers.

use std::sync::LazyLock;

use regex::Regex;

static HUMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("hump pattern is valid"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("boundary pattern is valid"));

/// Converts a camel-case set name into a lower-case, underscore separated
/// symbol (`RenderBasic` becomes `render_basic`).
///
/// `MHz` is folded to `Mhz` first so that frequency suffixes stay one word.
/// Runs of capitals keep together until the last one, which starts the next
/// word (`L3Cache` stays `l3_cache`, `HDCAndSF` becomes `hdc_and_sf`).
#[must_use]
pub fn underscore(name: &str) -> String {
    let folded = name.replace("MHz", "Mhz");
    let humped = HUMP.replace_all(&folded, "${1}_${2}");
    LOWER_UPPER
        .replace_all(&humped, "${1}_${2}")
        .to_lowercase()
}
