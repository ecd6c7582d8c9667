use scraper::{Html, Selector};

use super::roster_page::image_source;
use crate::error::Result;

/// Portable-infobox thumbnail shown at the top of a character article.
const THUMBNAIL_SELECTOR: &str = "img.pi-image-thumbnail";

/// Returns the infobox portrait of a character article, if it has one.
pub fn extract_thumbnail(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(THUMBNAIL_SELECTOR)?;

    Ok(document.select(&selector).next().and_then(image_source))
}
