use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_quote_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let job = write_fixture(
        dir.path(),
        "job.json",
        r#"{
            "options": {
                "copies": 2,
                "paperSize": "a4",
                "orientation": "portrait",
                "colorMode": "color",
                "sides": "double",
                "binding": "spiral",
                "paperType": "normal",
                "stapling": "none",
                "pageRangeText": "",
                "holePunch": false,
                "coverPage": "none"
            },
            "pageCount": 10
        }"#,
    );
    let pricing = write_fixture(
        dir.path(),
        "pricing.json",
        r#"{
            "perPageBW": 2,
            "perPageColor": 5,
            "doubleSidedDiscount": 1,
            "serviceFee": 0,
            "holePunchPrice": 0,
            "coverPagePrice": 0,
            "paperSizeMultiplier": {"a4": 1},
            "paperTypeFees": {},
            "bindingPrices": {"spiral": 20},
            "staplingPrices": {}
        }"#,
    );

    let mut cmd = Command::new(cargo_bin!("printdesk"));
    cmd.arg("quote").arg(&job).arg("--pricing").arg(&pricing);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total\": \"120\""))
        .stdout(predicate::str::contains("Color printing"))
        .stdout(predicate::str::contains("Double-sided discount"))
        .stdout(predicate::str::contains("Spiral binding"));

    Ok(())
}

#[test]
fn test_quote_with_builtin_rate_card() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let job = write_fixture(
        dir.path(),
        "job.json",
        r#"{
            "options": {
                "copies": 1,
                "paperSize": "a4",
                "orientation": "portrait",
                "colorMode": "bw",
                "sides": "single",
                "binding": "none",
                "paperType": "normal",
                "stapling": "none",
                "pageRangeText": "",
                "holePunch": false,
                "coverPage": "none"
            },
            "pageCount": 10
        }"#,
    );

    let mut cmd = Command::new(cargo_bin!("printdesk"));
    cmd.arg("quote").arg(&job);

    // 10 pages × ₹2 B&W on the default rate card
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total\": \"20\""))
        .stdout(predicate::str::contains("B&W printing"));

    Ok(())
}

#[test]
fn test_quote_missing_file_fails() {
    let mut cmd = Command::new(cargo_bin!("printdesk"));
    cmd.arg("quote").arg("no-such-job.json");

    cmd.assert().failure();
}
