//! Bill records and the metadata that keys them.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::BillError;
use crate::types::action::BillAction;
use crate::types::vote::BillVoteEvent;

/// Chamber of origin, derived from the detail URL's document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    /// Document-type code used in bill numbers and full-text URLs.
    pub fn doc_type(self) -> &'static str {
        match self {
            Chamber::House => "HB",
            Chamber::Senate => "SB",
        }
    }

    fn from_doc_type(code: &str) -> Option<Self> {
        match code {
            "HB" => Some(Chamber::House),
            "SB" => Some(Chamber::Senate),
            _ => None,
        }
    }
}

/// Natural key of a bill: one bill per (assembly, chamber, number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillKey {
    pub assembly: i64,
    pub chamber: Chamber,
    pub number: i64,
}

/// Immutable identity of a bill, derived from its detail-page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillMetadata {
    /// General Assembly number
    pub assembly: i64,

    /// Chamber of origin
    pub chamber: Chamber,

    /// Bill number within assembly and chamber
    pub number: i64,

    /// Detail-page URL the bill was scraped from
    pub url: String,
}

impl BillMetadata {
    /// Derive metadata from a detail-page URL.
    ///
    /// Requires the `DocNum`, `DocTypeID`, and `GA` query parameters; a URL
    /// missing any of them (or carrying a document type other than HB/SB)
    /// skips the bill.
    pub fn from_detail_url(url: &Url) -> Result<Self, BillError> {
        let param = |key: &'static str| {
            url.query_pairs()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.into_owned())
                .ok_or(BillError::Metadata {
                    field: key,
                    url: url.to_string(),
                })
        };

        let number = param("DocNum")?
            .parse::<i64>()
            .map_err(|_| BillError::Metadata {
                field: "DocNum",
                url: url.to_string(),
            })?;
        let chamber =
            Chamber::from_doc_type(&param("DocTypeID")?).ok_or(BillError::Metadata {
                field: "DocTypeID",
                url: url.to_string(),
            })?;
        let assembly = param("GA")?
            .parse::<i64>()
            .map_err(|_| BillError::Metadata {
                field: "GA",
                url: url.to_string(),
            })?;

        Ok(Self {
            assembly,
            chamber,
            number,
            url: url.to_string(),
        })
    }

    /// Natural key for storage lookup and run-level deduplication.
    pub fn key(&self) -> BillKey {
        BillKey {
            assembly: self.assembly,
            chamber: self.chamber,
            number: self.number,
        }
    }
}

/// Committee-derived category of a bill.
///
/// Serialized as a plain string; the empty string means unclassified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillCategory {
    /// Committee absent from the lookup table, or no committee at all
    Unclassified,
    /// Category label from the lookup table
    Named(String),
}

impl From<String> for BillCategory {
    fn from(value: String) -> Self {
        if value.is_empty() {
            BillCategory::Unclassified
        } else {
            BillCategory::Named(value)
        }
    }
}

impl From<BillCategory> for String {
    fn from(value: BillCategory) -> Self {
        match value {
            BillCategory::Unclassified => String::new(),
            BillCategory::Named(label) => label,
        }
    }
}

/// Full legislative text of a bill and where it was fetched from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillFullText {
    pub url: String,
    pub full_text: String,
}

/// A synchronized bill record.
///
/// `actions_fingerprint` is always the fingerprint of `actions`; the two are
/// updated together inside the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub metadata: BillMetadata,

    /// Short description published on the detail page
    pub title: String,

    /// First synopsis paragraph
    pub short_summary: String,

    /// Remaining synopsis paragraphs
    pub full_summary: String,

    /// Every sponsor in published order; None where no member id was found
    pub sponsor_ids: Vec<Option<i64>>,

    pub house_primary_sponsor: Option<i64>,
    pub senate_primary_sponsor: Option<i64>,
    pub chief_sponsor: Option<i64>,

    /// Action history, replaced atomically when the fingerprint changes
    pub actions: Vec<BillAction>,

    /// Fingerprint of the actions region the actions were derived from
    pub actions_fingerprint: String,

    pub category: BillCategory,

    /// Raw committee id behind `category`; empty when none was found
    pub committee_id: String,

    /// Date of the first action in UTC epoch milliseconds; None when the
    /// bill has no dated actions yet
    pub created: Option<i64>,

    /// True once the bill has passed third reading in its first chamber
    pub viewable: bool,

    pub vote_events: Vec<BillVoteEvent>,

    pub full_text: BillFullText,
}

impl Bill {
    /// Empty record for a bill seen for the first time.
    pub fn new(metadata: BillMetadata) -> Self {
        Self {
            metadata,
            title: String::new(),
            short_summary: String::new(),
            full_summary: String::new(),
            sponsor_ids: Vec::new(),
            house_primary_sponsor: None,
            senate_primary_sponsor: None,
            chief_sponsor: None,
            actions: Vec::new(),
            actions_fingerprint: String::new(),
            category: BillCategory::Unclassified,
            committee_id: String::new(),
            created: None,
            viewable: false,
            vote_events: Vec::new(),
            full_text: BillFullText::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_from_detail_url() {
        let url = Url::parse(
            "https://www.ilga.gov/legislation/BillStatus.asp?DocNum=42&GA=101&DocTypeID=SB&SessionId=100",
        )
        .unwrap();

        let md = BillMetadata::from_detail_url(&url).unwrap();
        assert_eq!(md.assembly, 101);
        assert_eq!(md.chamber, Chamber::Senate);
        assert_eq!(md.number, 42);
        assert_eq!(
            md.key(),
            BillKey {
                assembly: 101,
                chamber: Chamber::Senate,
                number: 42
            }
        );
    }

    #[test]
    fn metadata_requires_doc_num() {
        let url =
            Url::parse("https://www.ilga.gov/legislation/BillStatus.asp?GA=101&DocTypeID=SB")
                .unwrap();

        let err = BillMetadata::from_detail_url(&url).unwrap_err();
        assert!(matches!(err, BillError::Metadata { field: "DocNum", .. }));
    }

    #[test]
    fn metadata_rejects_unknown_doc_type() {
        let url = Url::parse(
            "https://www.ilga.gov/legislation/BillStatus.asp?DocNum=7&GA=101&DocTypeID=SJR",
        )
        .unwrap();

        let err = BillMetadata::from_detail_url(&url).unwrap_err();
        assert!(matches!(err, BillError::Metadata { field: "DocTypeID", .. }));
    }

    #[test]
    fn category_round_trips_as_string() {
        let named: BillCategory = "Education".to_string().into();
        assert_eq!(named, BillCategory::Named("Education".to_string()));
        assert_eq!(String::from(named), "Education");

        let empty: BillCategory = String::new().into();
        assert_eq!(empty, BillCategory::Unclassified);
    }
}
