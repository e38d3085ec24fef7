use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One row of the holiday list, in the list API's field names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HolidayRecord {
    pub id: i64,
    pub title: String,
    pub holiday_date: DateTime<Utc>,
    #[serde(default)]
    pub holiday_type: Option<String>,
    #[serde(default)]
    pub holiday_tag: Option<String>,
    #[serde(default, rename = "HolidayGraphic")]
    pub graphic: Option<Graphic>,
    #[allow(dead_code)]
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[allow(dead_code)]
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Hyperlink/picture column value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Graphic {
    #[serde(default)]
    pub description: String,
    pub url: String,
}

impl HolidayRecord {
    pub fn category(&self) -> Option<HolidayCategory> {
        self.holiday_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(HolidayCategory::parse)
    }

    /// Alt text for the graphic, falling back to the title.
    pub fn graphic_label(&self) -> Option<&str> {
        let graphic = self.graphic.as_ref().filter(|g| !g.url.is_empty())?;
        if graphic.description.is_empty() {
            Some(&self.title)
        } else {
            Some(&graphic.description)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayCategory {
    Federal,
    Floating,
    Company,
    Observance,
    Other,
}

impl HolidayCategory {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "federal" => Self::Federal,
            "floating" => Self::Floating,
            "company" => Self::Company,
            "observance" => Self::Observance,
            _ => Self::Other,
        }
    }
}

/// Body of an `items` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ListItemsResponse {
    pub value: Vec<HolidayRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "Id": 7,
        "Title": "Independence Day",
        "HolidayDate": "2025-07-04T07:00:00Z",
        "HolidayType": "Federal",
        "HolidayTag": "Office closed",
        "HolidayGraphic": { "Description": "Fireworks", "Url": "https://contoso.example/fireworks.png" },
        "Created": "2024-11-02T16:20:00Z",
        "Modified": "2024-11-03T09:00:00Z"
    }"#;

    #[test]
    fn test_deserialize_full_record() {
        let record: HolidayRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.title, "Independence Day");
        assert_eq!(
            record.holiday_date,
            Utc.with_ymd_and_hms(2025, 7, 4, 7, 0, 0).unwrap()
        );
        assert_eq!(record.category(), Some(HolidayCategory::Federal));
        assert_eq!(record.holiday_tag.as_deref(), Some("Office closed"));
        assert_eq!(record.graphic_label(), Some("Fireworks"));
        assert!(record.created.is_some());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{ "Id": 1, "Title": "New Year", "HolidayDate": "2025-01-01T00:00:00Z",
                        "HolidayType": null, "HolidayGraphic": null }"#;
        let record: HolidayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category(), None);
        assert_eq!(record.graphic, None);
        assert_eq!(record.graphic_label(), None);
        assert_eq!(record.modified, None);
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let json = r#"{ "Id": 1, "Title": "New Year" }"#;
        assert!(serde_json::from_str::<HolidayRecord>(json).is_err());
    }

    #[test]
    fn test_graphic_label_falls_back_to_title() {
        let json = r#"{ "Id": 2, "Title": "Founders Day", "HolidayDate": "2025-05-09T00:00:00Z",
                        "HolidayGraphic": { "Description": "", "Url": "https://contoso.example/f.png" } }"#;
        let record: HolidayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.graphic_label(), Some("Founders Day"));
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(HolidayCategory::parse("FLOATING"), HolidayCategory::Floating);
        assert_eq!(HolidayCategory::parse(" company "), HolidayCategory::Company);
        assert_eq!(HolidayCategory::parse("Observance"), HolidayCategory::Observance);
        assert_eq!(HolidayCategory::parse("Regional"), HolidayCategory::Other);
    }
}
