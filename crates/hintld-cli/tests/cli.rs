//! Runs the `hintld` binary against tables in a temp directory

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const HEADER: &str =
    "Uniprot_A\tUniprot_B\tGene_A\tGene_B\tORF_A\tORF_B\tAlias_A\tAlias_B\tpmid:method:quality";

fn write_table(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) {
    let mut text = String::from(HEADER);
    text.push('\n');
    for (a, b, publications) in rows {
        text.push_str(&format!(
            "{a}\t{b}\tg{a}\tg{b}\to{a}\to{b}\t-\t-\t{publications}\n"
        ));
    }
    std::fs::write(dir.join(name), text).unwrap();
}

/// Two organisms; the config is written last so `extra` can add keys.
fn fixture(extra: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();

    write_table(&data, "h_binary_all.txt", &[("A", "B", "111:0018:HT"), ("C", "D", "222:0018:LC")]);
    write_table(&data, "h_binary_hq.txt", &[("A", "B", "111:0018:HT")]);
    write_table(&data, "h_cocomp_all.txt", &[("E", "F", "PDB_1ABC:0019:HT")]);
    write_table(&data, "y_binary_all.txt", &[("Y1", "Y2", "111:0018:HT")]);
    write_table(&data, "y_cocomp_all.txt", &[]);

    let config = format!(
        r#"{{
            "data_path": "{data}",
            "output_file": "{out}",
            "context_path": "hint_context.jsonld",
            {extra}
            "organism": {{
                "Yeast": {{ "taxid": 559292, "binary_all": "y_binary_all.txt", "cocomp_all": "y_cocomp_all.txt" }},
                "Human": {{ "taxid": 9606, "binary_all": "h_binary_all.txt", "binary_hq": "h_binary_hq.txt",
                            "cocomp_all": "h_cocomp_all.txt" }}
            }}
        }}"#,
        data = data.display(),
        out = dir.path().join("out/hint.jsonl").display(),
    );
    std::fs::write(dir.path().join("hintld.json"), config).unwrap();
    dir
}

fn hintld(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hintld"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn read_lines(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn default_command_converts_all_organisms() {
    let dir = fixture("");
    let out = hintld(dir.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let lines = read_lines(&dir.path().join("out/hint.jsonl"));
    let ids: Vec<&str> = lines.iter().map(|v| v["@id"].as_str().unwrap()).collect();
    // Human before Yeast, interactions before evidence within each
    assert_eq!(
        ids,
        [
            "hnt:A-B",
            "hnt:C-D",
            "hnt:E-F",
            "pint:evidence-pubmed_111-MI_0018-high-throughput",
            "pint:evidence-pubmed_222-MI_0018-literature-curated",
            "pint:evidence-pdb_1abc-MI_0019-high-throughput",
            "hnt:Y1-Y2",
            "pint:evidence-pubmed_111-MI_0018-high-throughput",
        ]
    );
    assert_eq!(lines[0]["bp3:organism"]["@id"], "taxon:9606");
    assert_eq!(lines[6]["bp3:organism"]["@id"], "taxon:559292");
    assert_eq!(lines[6]["pint:accuracy"], "low");
}

#[test]
fn convert_one_organism_to_turtle() {
    let dir = fixture(r#""format": "turtle","#);
    let out = hintld(
        dir.path(),
        &["convert", "--organism", "Yeast", "-o", "yeast.ttl"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let text = std::fs::read_to_string(dir.path().join("yeast.ttl")).unwrap();
    assert!(text.starts_with("@prefix "));
    assert!(text.contains("Y1-Y2"));
    assert!(text.contains("MolecularInteraction"));
    assert!(!text.contains("A-B"));
    assert!(text.contains("gY1"));
    assert!(!dir.path().join("out/hint.jsonl").exists());
}

#[test]
fn missing_table_fails_without_output() {
    let dir = fixture("");
    std::fs::remove_file(dir.path().join("data/y_cocomp_all.txt")).unwrap();

    let out = hintld(dir.path(), &["convert"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Yeast"), "{stderr}");
    assert!(!dir.path().join("out/hint.jsonl").exists());
    assert!(!dir.path().join("out/hint.jsonl.tmp").exists());
}

#[test]
fn malformed_publication_policy() {
    let dir = fixture("");
    write_table(
        &dir.path().join("data"),
        "y_binary_all.txt",
        &[("Y1", "Y2", "111:0018:HT|garbage")],
    );
    let out = hintld(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("garbage"));

    let dir = fixture(r#""malformed_publication": "skip","#);
    write_table(
        &dir.path().join("data"),
        "y_binary_all.txt",
        &[("Y1", "Y2", "111:0018:HT|garbage")],
    );
    let out = hintld(dir.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn config_command_lists_organisms() {
    let dir = fixture("");
    let out = hintld(dir.path(), &["config"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Human"));
    assert!(stderr.contains("559292"));
    assert!(stderr.contains("normalized"));
}

#[test]
fn fetch_without_section_fails() {
    let dir = fixture("");
    let out = hintld(dir.path(), &["fetch"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("fetch"));
}

#[test]
fn missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let out = hintld(dir.path(), &["convert"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("hintld.json"));
}
