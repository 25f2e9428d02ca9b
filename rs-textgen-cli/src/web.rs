use reqwest::StatusCode;
use scraper::{Html, Selector};

use rs_textgen_core::{Result, TextGenError};

/// Tags whose text content is used for training, in extraction order.
const TAGS: [&str; 16] = [
	"p", "h1", "h2", "h3", "h4", "h5", "h6", "q", "blockquote", "strong", "em", "del", "ins", "blink",
	"marquee", "div",
];

/// A downloaded web page, ready to be streamed as text fragments.
pub struct PageSource {
	document: Html,
}

impl PageSource {
	/// Downloads `url`.
	///
	/// # Errors
	/// `Fetch` if the request fails or the server does not answer 200.
	pub fn fetch(url: &str) -> Result<Self> {
		let response = reqwest::blocking::get(url).map_err(|e| TextGenError::Fetch(format!("{url}: {e}")))?;
		if response.status() != StatusCode::OK {
			log::error!("status {}, cannot use {url}", response.status());
			return Err(TextGenError::Fetch(format!("{url}: status {}", response.status())));
		}
		log::info!("connection to {url} succeeded");

		let body = response.text().map_err(|e| TextGenError::Fetch(format!("{url}: {e}")))?;
		Ok(Self::from_html(&body))
	}

	pub fn from_html(html: &str) -> Self {
		Self { document: Html::parse_document(html) }
	}

	/// Text of every element matching one of [`TAGS`], tag by tag.
	///
	/// Nested matches yield their text once per matching ancestor.
	pub fn fragments(&self) -> impl Iterator<Item = String> + '_ {
		TAGS.iter()
			.filter_map(|tag| Selector::parse(tag).ok())
			.flat_map(|selector| {
				self.document
					.select(&selector)
					.map(|element| element.text().collect::<String>())
					.collect::<Vec<_>>()
			})
	}
}
