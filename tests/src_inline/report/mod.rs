use std::fs;
use std::path::PathBuf;

use super::json::{render_summary_json, write_summary};
use super::*;
use crate::pipeline::stage2_sweep::ColumnReport;

fn sample_report(root: PathBuf) -> SweepReport {
    SweepReport {
        input: PathBuf::from("CellFie.csv"),
        output_root: root.clone(),
        map_dir: PathBuf::from("maps"),
        map_assets: vec!["map1.json".to_string(), "map2.json".to_string()],
        columns: vec![ColumnReport {
            name: "A".to_string(),
            column_index: 1,
            rows: 3,
            keys: 2,
            overwritten: 1,
            artifacts: vec![
                root.join("A/A_map1.json.html"),
                root.join("A/A_map2.json.html"),
            ],
        }],
    }
}

#[test]
fn test_summary_json_fields() {
    let report = sample_report(PathBuf::from("out"));
    let options = RenderOptions::default();
    let json = render_summary_json(&SummaryData::new(&report, &options)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["tool"], "cellfie-escher");
    assert_eq!(value["artifact_count"], 2);
    assert_eq!(value["options"]["reaction_scale_preset"], "GaBuRd");
    assert_eq!(value["options"]["scroll_behavior"], "zoom");
    assert_eq!(value["map_assets"][1], "map2.json");
    assert_eq!(value["columns"][0]["overwritten"], 1);
    assert!(json.ends_with('\n'));
}

#[test]
fn test_write_summary_to_output_root() {
    let mut root = std::env::temp_dir();
    root.push(format!("cellfie_escher_summary_{}", std::process::id()));
    fs::create_dir_all(&root).unwrap();

    let report = sample_report(root.clone());
    let options = RenderOptions::default();
    let path = write_summary(&SummaryData::new(&report, &options), &root).unwrap();

    assert_eq!(path, root.join(SUMMARY_FILE));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"columns\""));
}
