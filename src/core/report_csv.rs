use crate::core::ReportBundle;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 將一個 ReportBundle 寫成 `{name}.csv`，已存在就覆寫。
/// 欄位標頭來自 MonthlyTotal 的欄位順序（month,year,sum），
/// 值只會是短標籤和整數，csv crate 不會引入引號。
pub fn write_bundle(bundle: &ReportBundle, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.csv", bundle.name));

    let mut writer = csv::Writer::from_path(&path)?;

    for total in &bundle.data {
        writer.serialize(total)?;
    }

    writer.flush()?;

    tracing::info!("wrote {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MonthlyTotal;
    use tempfile::TempDir;

    fn posts_bundle() -> ReportBundle {
        ReportBundle {
            name: "posts".to_string(),
            data: vec![
                MonthlyTotal {
                    month: "Mar".to_string(),
                    year: "2024".to_string(),
                    sum: 12,
                },
                MonthlyTotal {
                    month: "Feb".to_string(),
                    year: "2024".to_string(),
                    sum: 2,
                },
                MonthlyTotal {
                    month: "Jan".to_string(),
                    year: "2024".to_string(),
                    sum: 10,
                },
            ],
        }
    }

    #[test]
    fn test_write_bundle_produces_expected_csv() {
        let temp_dir = TempDir::new().unwrap();

        let path = write_bundle(&posts_bundle(), temp_dir.path()).unwrap();

        assert_eq!(path, temp_dir.path().join("posts.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "month,year,sum\nMar,2024,12\nFeb,2024,2\nJan,2024,10\n");
    }

    #[test]
    fn test_csv_round_trip_preserves_values_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let bundle = posts_bundle();

        let path = write_bundle(&bundle, temp_dir.path()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: Vec<MonthlyTotal> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(parsed, bundle.data);
    }

    #[test]
    fn test_rewriting_same_bundle_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let bundle = posts_bundle();

        let path = write_bundle(&bundle, temp_dir.path()).unwrap();
        let first = std::fs::read(&path).unwrap();

        let path_again = write_bundle(&bundle, temp_dir.path()).unwrap();
        let second = std::fs::read(&path_again).unwrap();

        assert_eq!(path, path_again);
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_bundle_overwrites_stale_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("posts.csv");
        std::fs::write(&path, "stale content that is much longer than the real csv output\n")
            .unwrap();

        write_bundle(&posts_bundle(), temp_dir.path()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("month,year,sum\n"));
        assert!(!content.contains("stale"));
    }
}
