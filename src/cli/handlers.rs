// FILE: src/cli/handlers.rs
use crate::cli::{Cli, GridKindArg, OutputFormat};
use crate::grid_template::{self, GridKind};
use crate::{Result, UtilitiesError};

use std::fs;
use std::path::Path;
use std::time::Instant;

// --- BUILD ---
pub fn handle_build_command(cli: &Cli, matches: &clap::ArgMatches) -> Result<()> {
    let stylesheet = cli.build_stylesheet(matches)?;

    let mut candidates: Vec<String> = cli.content().to_vec();
    if let Some(classes) = matches.get_many::<String>("classes") {
        candidates.extend(classes.cloned());
    }
    if let Some(paths) = matches.get_many::<String>("content") {
        for path in paths {
            candidates.extend(scan_file(path)?);
        }
    }
    log::info!("Resolving {} class candidates", candidates.len());

    let build_start = Instant::now();
    let format = matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or(OutputFormat::Css);
    let output = match format {
        OutputFormat::Css => {
            stylesheet.to_css(candidates.iter().map(String::as_str), matches.get_flag("minify"))
        }
        OutputFormat::Json => {
            let json = stylesheet.to_json(candidates.iter().map(String::as_str));
            serde_json::to_string_pretty(&json)
                .map_err(|e| UtilitiesError::invalid_format(format!("Failed to serialize rules: {}", e)))?
        }
    };
    log::info!("Generated {} bytes in {}ms", output.len(), build_start.elapsed().as_millis());

    match matches.get_one::<String>("output") {
        Some(output_path) => {
            write_output(output_path, &output)?;
            println!("✅ Wrote {} ({} bytes)", output_path, output.len());
        }
        None => print!("{}", output),
    }

    Ok(())
}

// --- LIST ---
pub fn handle_list_command(cli: &Cli, matches: &clap::ArgMatches) -> Result<()> {
    let stylesheet = cli.build_stylesheet(matches)?;

    if matches.get_flag("families") {
        for name in stylesheet.family_names() {
            println!("{}{}", stylesheet.prefix(), name);
        }
    } else {
        for name in stylesheet.class_names() {
            println!("{}", name);
        }
    }
    Ok(())
}

// --- GRID TABLE ---
pub fn handle_grid_table_command(cli: &Cli, matches: &clap::ArgMatches) -> Result<()> {
    let kind = match matches.get_one::<GridKindArg>("kind") {
        Some(GridKindArg::Rows) => GridKind::Rows,
        _ => GridKind::Cols,
    };
    let max = match matches.get_one::<u32>("max") {
        Some(max) => *max,
        None => cli.build_plugin_options(matches)?.max_grid_template,
    };

    let table = grid_template::generate(kind, max);
    let json = serde_json::to_string_pretty(&table)
        .map_err(|e| UtilitiesError::invalid_format(format!("Failed to serialize grid table: {}", e)))?;
    println!("{}", json);
    Ok(())
}

// --- HELPERS ---
fn write_output(output_path: &str, contents: &str) -> Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_path, contents)?;
    Ok(())
}

fn scan_file(path: &str) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .map_err(|e| UtilitiesError::file_not_found(format!("{}: {}", path, e)))?;
    let candidates = extract_candidates(&text);
    log::debug!("Found {} candidates in {}", candidates.len(), path);
    Ok(candidates)
}

/// Split markup or source text into class-like tokens. Brackets keep their
/// contents together so `d-[calc(100%_-_2rem)]` survives intact.
pub fn extract_candidates(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth: usize = 0;

    for ch in text.chars() {
        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            _ => {}
        }

        let boundary = ch.is_whitespace() || matches!(ch, '"' | '\'' | '`' | '<' | '>' | '=' | '{' | '}');
        if boundary && bracket_depth == 0 {
            if is_valid_candidate(&current) {
                tokens.push(current.clone());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }

    if is_valid_candidate(&current) {
        tokens.push(current);
    }
    tokens
}

fn is_valid_candidate(token: &str) -> bool {
    let Some(first) = token.chars().next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '-' {
        return false;
    }

    // Separators only show up inside arbitrary values.
    let outside = token.split('[').next().unwrap_or(token);
    !outside.contains(|c: char| c == ',' || c == ';' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_candidates_from_markup() {
        let candidates = extract_candidates(
            r#"<div class="flex/4 center-all"><span class='d-[calc(100%_-_2rem)]/64 ring-sh-[inset;2px;red]'>hi</span></div>"#,
        );

        assert!(candidates.contains(&"flex/4".to_string()));
        assert!(candidates.contains(&"center-all".to_string()));
        assert!(candidates.contains(&"d-[calc(100%_-_2rem)]/64".to_string()));
        assert!(candidates.contains(&"ring-sh-[inset;2px;red]".to_string()));
        assert!(!candidates.iter().any(|candidate| candidate.starts_with('<')));
    }

    #[test]
    fn test_extract_skips_non_class_tokens() {
        let candidates = extract_candidates("42 , ; {center}");
        assert_eq!(candidates, vec!["center".to_string()]);
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.css");
        let path = path.to_str().unwrap();

        write_output(path, ".center{}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), ".center{}");
    }

    #[test]
    fn test_scan_missing_file() {
        assert!(matches!(
            scan_file("/definitely/not/here.html"),
            Err(UtilitiesError::FileNotFound { .. })
        ));
    }
}
