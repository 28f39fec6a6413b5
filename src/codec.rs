//! Mapping between [`LicenseRecord`]s and the two plist dialects.
//!
//! - *Preference specifiers* (CocoaPods / Settings.bundle): `PreferenceSpecifiers`
//!   holds dictionaries with `Title` and `FooterText`.
//! - *Library list*: `libraries` holds dictionaries with `name` and `licenseBody`.

use std::collections::BTreeMap;

use crate::models::LicenseRecord;
use crate::plist::{string_dict, Value};

pub const PREFERENCE_SPECIFIERS: &str = "PreferenceSpecifiers";
pub const LIBRARIES: &str = "libraries";

const TITLE: &str = "Title";
const FOOTER_TEXT: &str = "FooterText";
const TYPE: &str = "Type";
const FILE: &str = "File";
const NAME: &str = "name";
const LICENSE_BODY: &str = "licenseBody";

const GROUP_SPECIFIER: &str = "PSGroupSpecifier";
const CHILD_PANE_SPECIFIER: &str = "PSChildPaneSpecifier";

/// Title CocoaPods gives its leading "third party libraries" entry.
const ACKNOWLEDGEMENTS_PLACEHOLDER: &str = "Acknowledgements";
const INDEX_HEADER_TITLE: &str = "Licenses";

/// Shape of a decoded plist, decided by which list key it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    PreferenceSpecifiers,
    LibraryList,
    Unrecognized,
}

/// Detect the dialect. `PreferenceSpecifiers` wins when both keys are present.
pub fn detect(value: &Value) -> Dialect {
    let Some(root) = value.as_dictionary() else {
        return Dialect::Unrecognized;
    };

    if root.get(PREFERENCE_SPECIFIERS).and_then(Value::as_array).is_some() {
        Dialect::PreferenceSpecifiers
    } else if root.get(LIBRARIES).and_then(Value::as_array).is_some() {
        Dialect::LibraryList
    } else {
        Dialect::Unrecognized
    }
}

/// Decode every qualifying entry of `value` according to `dialect`.
pub fn decode(dialect: Dialect, value: &Value) -> Vec<LicenseRecord> {
    let key = match dialect {
        Dialect::PreferenceSpecifiers => PREFERENCE_SPECIFIERS,
        Dialect::LibraryList => LIBRARIES,
        Dialect::Unrecognized => return Vec::new(),
    };

    let entries = value
        .as_dictionary()
        .and_then(|root| root.get(key))
        .and_then(Value::as_array)
        .unwrap_or_default();

    entries
        .iter()
        .filter_map(Value::as_dictionary)
        .filter_map(|entry| match dialect {
            Dialect::PreferenceSpecifiers => preference_specifier_record(entry),
            Dialect::LibraryList => library_list_record(entry),
            Dialect::Unrecognized => None,
        })
        .collect()
}

/// String value of `key`. Other fields of the entry may hold any type; only
/// the fields a record needs must be strings.
fn string_field<'a>(entry: &'a BTreeMap<String, Value>, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_str)
}

fn preference_specifier_record(entry: &BTreeMap<String, Value>) -> Option<LicenseRecord> {
    let title = string_field(entry, TITLE)?;
    if title == ACKNOWLEDGEMENTS_PLACEHOLDER {
        return None;
    }
    let body = string_field(entry, FOOTER_TEXT)?;
    LicenseRecord::new(title, body)
}

fn library_list_record(entry: &BTreeMap<String, Value>) -> Option<LicenseRecord> {
    let name = string_field(entry, NAME)?;
    let body = string_field(entry, LICENSE_BODY)?;
    LicenseRecord::new(name, body)
}

fn root_with(key: &str, entries: Vec<Value>) -> Value {
    Value::Dictionary(BTreeMap::from([(key.to_string(), Value::Array(entries))]))
}

/// Child pane for one library: a single group specifier whose footer is the license.
pub fn encode_child(record: &LicenseRecord) -> Value {
    root_with(
        PREFERENCE_SPECIFIERS,
        vec![string_dict([
            (FOOTER_TEXT, record.body.as_str()),
            (TYPE, GROUP_SPECIFIER),
        ])],
    )
}

/// Root pane: a `Licenses` header followed by one child-pane link per record.
///
/// `bundle_name` is the directory (relative to the root plist) holding the children.
pub fn encode_index(bundle_name: &str, records: &[LicenseRecord]) -> Value {
    let header = string_dict([(TITLE, INDEX_HEADER_TITLE), (TYPE, GROUP_SPECIFIER)]);
    let children = records.iter().map(|record| {
        string_dict([
            (FILE, format!("{}/{}", bundle_name, record.name)),
            (TITLE, record.name.clone()),
            (TYPE, CHILD_PANE_SPECIFIER.to_string()),
        ])
    });

    root_with(
        PREFERENCE_SPECIFIERS,
        std::iter::once(header).chain(children).collect(),
    )
}

/// Every record as a flat `libraries` list.
pub fn encode_library_list(records: &[LicenseRecord]) -> Value {
    root_with(
        LIBRARIES,
        records
            .iter()
            .map(|record| {
                string_dict([
                    (NAME, record.name.as_str()),
                    (LICENSE_BODY, record.body.as_str()),
                ])
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, body: &str) -> LicenseRecord {
        LicenseRecord::new(name, body).unwrap()
    }

    fn specifiers(entries: Vec<Value>) -> Value {
        root_with(PREFERENCE_SPECIFIERS, entries)
    }

    #[test]
    fn test_detect() {
        assert_eq!(detect(&specifiers(vec![])), Dialect::PreferenceSpecifiers);
        assert_eq!(
            detect(&root_with(LIBRARIES, vec![])),
            Dialect::LibraryList
        );
        assert_eq!(detect(&string_dict([("other", "x")])), Dialect::Unrecognized);
        assert_eq!(detect(&Value::Array(vec![])), Dialect::Unrecognized);
        // key present but not a list
        assert_eq!(
            detect(&string_dict([(PREFERENCE_SPECIFIERS, "x")])),
            Dialect::Unrecognized
        );
    }

    #[test]
    fn test_preference_specifiers_first() {
        let mut both = specifiers(vec![]);
        if let Value::Dictionary(root) = &mut both {
            root.insert(LIBRARIES.to_string(), Value::Array(vec![]));
        }
        assert_eq!(detect(&both), Dialect::PreferenceSpecifiers);
    }

    #[test]
    fn test_decode_preference_specifiers() {
        let value = specifiers(vec![
            string_dict([
                (TITLE, "Acknowledgements"),
                (FOOTER_TEXT, "This application makes use of..."),
                (TYPE, GROUP_SPECIFIER),
            ]),
            string_dict([(TITLE, "Alamofire"), (FOOTER_TEXT, "MIT\u{0c}text")]),
            string_dict([(TITLE, ""), (FOOTER_TEXT, "nameless")]),
            string_dict([(TITLE, "NoFooter")]),
            string_dict([(TITLE, "Kingfisher"), (FOOTER_TEXT, "MIT")]),
            Value::from("not a dictionary"),
        ]);

        let records = decode(Dialect::PreferenceSpecifiers, &value);
        assert_eq!(
            records,
            vec![record("Alamofire", "MITtext"), record("Kingfisher", "MIT")]
        );
    }

    #[test]
    fn test_non_string_fields_do_not_reject_entries() {
        let mut with_toggle = string_dict([(TITLE, "Realm"), (FOOTER_TEXT, "Apache")]);
        if let Value::Dictionary(fields) = &mut with_toggle {
            fields.insert("DefaultValue".to_string(), Value::Boolean(true));
            fields.insert("Order".to_string(), Value::Integer(3));
        }
        let mut numeric_title = string_dict([(FOOTER_TEXT, "numeric title")]);
        if let Value::Dictionary(fields) = &mut numeric_title {
            fields.insert(TITLE.to_string(), Value::Integer(7));
        }
        let value = specifiers(vec![
            with_toggle,
            numeric_title,
            string_dict([(TITLE, "SnapKit"), (FOOTER_TEXT, "MIT")]),
        ]);

        let records = decode(detect(&value), &value);
        assert_eq!(records, vec![record("Realm", "Apache"), record("SnapKit", "MIT")]);
    }

    #[test]
    fn test_decode_library_list() {
        let value = root_with(
            LIBRARIES,
            vec![
                string_dict([(NAME, "Realm"), (LICENSE_BODY, "Apache")]),
                string_dict([(NAME, "MissingBody")]),
                string_dict([(LICENSE_BODY, "missing name")]),
                string_dict([(NAME, ""), (LICENSE_BODY, "empty name")]),
            ],
        );

        let records = decode(Dialect::LibraryList, &value);
        assert_eq!(records, vec![record("Realm", "Apache")]);
    }

    #[test]
    fn test_decode_unrecognized_is_empty() {
        let value = root_with(LIBRARIES, vec![string_dict([(NAME, "a"), (LICENSE_BODY, "b")])]);
        assert!(decode(Dialect::Unrecognized, &value).is_empty());
    }

    #[test]
    fn test_child_decodes_back_with_title() {
        let original = record("ZBarSDK", "line 1\u{0c}\n  line 2\n");
        let child = encode_child(&original);

        // Lift the single child entry into a titled preference-specifier list.
        let mut entry = child.as_dictionary().unwrap()[PREFERENCE_SPECIFIERS]
            .as_array()
            .unwrap()[0]
            .clone();
        if let Value::Dictionary(fields) = &mut entry {
            fields.insert(TITLE.to_string(), Value::from("ZBarSDK"));
        }
        let wrapped = specifiers(vec![entry]);

        assert_eq!(detect(&wrapped), Dialect::PreferenceSpecifiers);
        let decoded = decode(detect(&wrapped), &wrapped);
        assert_eq!(decoded, vec![original]);
        assert_eq!(decoded[0].body, "line 1\n  line 2\n");
    }

    #[test]
    fn test_encode_index() {
        let records = vec![record("Abc", "a"), record("boost", "b")];
        let index = encode_index("Acknowledgements", &records);
        let entries = index.as_dictionary().unwrap()[PREFERENCE_SPECIFIERS]
            .as_array()
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            string_dict([(TITLE, "Licenses"), (TYPE, GROUP_SPECIFIER)])
        );
        assert_eq!(
            entries[2],
            string_dict([
                (FILE, "Acknowledgements/boost"),
                (TITLE, "boost"),
                (TYPE, CHILD_PANE_SPECIFIER),
            ])
        );
    }

    #[test]
    fn test_library_list_round_trip() {
        let records = vec![record("Realm", "Apache"), record("zlib", "zlib")];
        let value = encode_library_list(&records);
        assert_eq!(detect(&value), Dialect::LibraryList);
        assert_eq!(decode(Dialect::LibraryList, &value), records);
    }
}
