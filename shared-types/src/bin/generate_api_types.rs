use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the dashboard contract
    let mut types = Vec::new();

    // Dashboard types
    types.push(clean_type(DashboardStats::export_to_string()?));
    types.push(clean_type(ProjectCounters::export_to_string()?));
    types.push(clean_type(ProjectSummary::export_to_string()?));
    types.push(clean_type(UserSummary::export_to_string()?));
    types.push(clean_type(TaskSummary::export_to_string()?));
    types.push(clean_type(AssigneeOpenStat::export_to_string()?));
    types.push(clean_type(DashboardResponse::export_to_string()?));

    // Errors
    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("api-types.ts"));

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(&output_path, types.join("\n\n"))?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Every type lands in the same file, so per-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
