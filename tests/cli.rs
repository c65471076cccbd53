use anyhow::Result;
use std::{fs, process::Command};
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_claims-etl");

#[test]
fn prints_one_line_and_writes_summary() -> Result<()> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("claims_raw.csv"),
        "claim_id,claim_date,claim_status,drug_code,claim_cost\n\
         C1,2023-01-05,Paid,D1,50\n\
         C2,2023-01-20,Paid,D1,150\n\
         C3,2023-01-10,Rejected,D1,999\n",
    )?;

    let out = Command::new(BIN).current_dir(dir.path()).output()?;
    assert!(out.status.success());

    // logs go to stderr; stdout carries only the completion line
    let stdout = String::from_utf8(out.stdout)?;
    assert_eq!(
        stdout,
        "ETL pipeline executed successfully. Output saved to claims_summary.csv.\n"
    );

    let summary = fs::read_to_string(dir.path().join("claims_summary.csv"))?;
    assert_eq!(
        summary,
        "claim_month,drug_code,total_claims,total_cost,avg_cost,high_cost_count\n\
         2023-01,D1,2,200.0,100.0,1\n"
    );
    Ok(())
}

#[test]
fn missing_input_exits_non_zero() -> Result<()> {
    let dir = tempdir()?;

    let out = Command::new(BIN).current_dir(dir.path()).output()?;
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("claims_summary.csv").exists());
    Ok(())
}
