use std::io::Write;

use anyhow::Result;

use super::write_plist;
use crate::codec;
use crate::models::{Destination, LicenseRecord};

/// Write every record into the single `<dir>/<name>.plist` library list.
pub fn write(dest: &Destination, records: &[LicenseRecord], out: &mut impl Write) -> Result<()> {
    write_plist(&dest.root_plist(), &codec::encode_library_list(records))?;

    for record in records {
        writeln!(out, "{}", record.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::file::PlistFileLoader;
    use crate::loader::Loader;

    #[test]
    fn test_writes_flat_list() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = Destination {
            dir: tmp.path().to_path_buf(),
            name: "license-list".to_string(),
        };
        let records = vec![
            LicenseRecord::new("Firebase", "Apache").unwrap(),
            LicenseRecord::new("Realm", "Apache 2").unwrap(),
        ];

        let mut out = Vec::new();
        write(&dest, &records, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Firebase\nRealm\n");
        assert!(!dest.children_dir().exists());

        let reloaded = PlistFileLoader::new().load(&dest.root_plist()).into_records();
        assert_eq!(reloaded, records);
    }

    #[test]
    fn test_duplicates_are_written_twice() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = Destination {
            dir: tmp.path().to_path_buf(),
            name: "list".to_string(),
        };
        let records = vec![
            LicenseRecord::new("SnapKit", "v1").unwrap(),
            LicenseRecord::new("SnapKit", "v2").unwrap(),
        ];

        write(&dest, &records, &mut Vec::new()).unwrap();
        let reloaded = PlistFileLoader::new().load(&dest.root_plist()).into_records();
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_missing_destination_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = Destination {
            dir: tmp.path().join("does/not/exist"),
            name: "list".to_string(),
        };
        let records = vec![LicenseRecord::new("Realm", "Apache").unwrap()];
        assert!(write(&dest, &records, &mut Vec::new()).is_err());
    }
}
