//! @ai:module:intent Normalized issue record and its sparse JSON encoding
//! @ai:module:layer domain
//! @ai:module:public_api IssueRecord, Severity
//! @ai:module:depends_on paths, event
//! @ai:module:stateless true

use crate::error::Result;
use crate::event::DiagnosticEvent;
use crate::paths::{non_blank, normalize};
use serde::{Deserialize, Serialize};

/// @ai:intent Issue severity understood by the downstream reporting tool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Normal,
}

/// @ai:intent One diagnostic, flattened for line-delimited JSON output
/// @ai:invariant zero integers and blank strings are never serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub file_name: Option<String>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub line_start: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub line_end: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub column_start: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub column_end: u32,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub category: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "is_blank")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub reference: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    non_blank(value.as_deref()).is_none()
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn owned(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}

impl IssueRecord {
    /// @ai:intent Build a fully populated record from a host event in one step
    /// @ai:pre working_dir is the directory captured at process start
    /// @ai:effects pure
    pub fn from_event(working_dir: &str, severity: Severity, event: &DiagnosticEvent) -> Self {
        let paths = normalize(
            working_dir,
            event.project_file.as_deref(),
            event.file.as_deref(),
        );

        Self {
            file_name: paths.file_name,
            severity,
            module_name: paths.module_name,
            line_start: event.line_number,
            line_end: event.end_line_number,
            column_start: event.column_number,
            column_end: event.end_column_number,
            category: owned(&event.subcategory),
            kind: owned(&event.code),
            message: owned(&event.message),
            reference: owned(&event.help_link),
        }
    }

    /// @ai:intent Render as a single-line JSON object without a line terminator
    /// @ai:effects pure
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bare(severity: Severity) -> IssueRecord {
        IssueRecord {
            file_name: None,
            severity,
            module_name: None,
            line_start: 0,
            line_end: 0,
            column_start: 0,
            column_end: 0,
            category: None,
            kind: None,
            message: None,
            reference: None,
        }
    }

    #[test]
    fn test_warning_end_to_end_line() {
        let event = DiagnosticEvent {
            project_file: Some("/build/src/App.csproj".to_string()),
            file: Some("/build/src/App/Main.cs".to_string()),
            line_number: 12,
            ..Default::default()
        };

        let record = IssueRecord::from_event("/build", Severity::Normal, &event);

        assert_eq!(
            record.to_json_line().unwrap(),
            r#"{"fileName":"src/App/Main.cs","severity":"NORMAL","moduleName":"App.csproj","lineStart":12}"#
        );
    }

    #[test]
    fn test_field_order_and_casing() {
        let event = DiagnosticEvent {
            project_file: Some("/build/MyProj.csproj".to_string()),
            file: Some("/build/src/Foo.cs".to_string()),
            line_number: 10,
            end_line_number: 11,
            column_number: 4,
            end_column_number: 9,
            subcategory: Some("syntax".to_string()),
            code: Some("CS1525".to_string()),
            message: Some("Unexpected token".to_string()),
            help_link: Some("https://example.test/CS1525".to_string()),
        };

        let record = IssueRecord::from_event("/build", Severity::Error, &event);

        assert_eq!(
            record.to_json_line().unwrap(),
            concat!(
                r#"{"fileName":"src/Foo.cs","severity":"ERROR","moduleName":"MyProj.csproj","#,
                r#""lineStart":10,"lineEnd":11,"columnStart":4,"columnEnd":9,"#,
                r#""category":"syntax","type":"CS1525","message":"Unexpected token","#,
                r#""reference":"https://example.test/CS1525"}"#
            )
        );
    }

    #[test]
    fn test_blank_strings_are_normalized_to_absent() {
        let event = DiagnosticEvent {
            subcategory: Some("".to_string()),
            code: Some("   ".to_string()),
            message: Some("\t\n".to_string()),
            help_link: Some(" ".to_string()),
            ..Default::default()
        };

        let record = IssueRecord::from_event("/build", Severity::Error, &event);

        assert_eq!(record, bare(Severity::Error));
        assert_eq!(record.to_json_line().unwrap(), r#"{"severity":"ERROR"}"#);
    }

    #[test]
    fn test_hand_built_blank_fields_are_not_serialized() {
        let record = IssueRecord {
            file_name: Some(" ".to_string()),
            message: Some(String::new()),
            ..bare(Severity::Normal)
        };

        assert_eq!(record.to_json_line().unwrap(), r#"{"severity":"NORMAL"}"#);
    }

    #[test]
    fn test_file_outside_working_dir_is_kept() {
        let event = DiagnosticEvent {
            project_file: Some("/build/src/App.csproj".to_string()),
            file: Some("/other/Main.cs".to_string()),
            line_number: 12,
            ..Default::default()
        };

        let record = IssueRecord::from_event("/build", Severity::Normal, &event);

        assert_eq!(record.file_name.as_deref(), Some("/other/Main.cs"));
    }

    #[test]
    fn test_parse_back_sparse_line() {
        let record: IssueRecord =
            serde_json::from_str(r#"{"severity":"NORMAL","type":"CS0168"}"#).unwrap();

        assert_eq!(record.kind.as_deref(), Some("CS0168"));
        assert_eq!(record.line_start, 0);
    }
}
