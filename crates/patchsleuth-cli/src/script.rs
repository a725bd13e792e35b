/// Standalone verification script generation.
///
/// The script is plain Python so it can be shipped next to a patch and run
/// by players who do not have this tool. It only reads the manifest's
/// `files[].path` values and checks that each exists under the game
/// directory given on its command line.
use chrono::{DateTime, Local};

/// File name used when no script output path is given.
pub const DEFAULT_SCRIPT_FILE: &str = "verify_files.py";

const TEMPLATE: &str = r#"#!/usr/bin/env python3
# -*- coding: utf-8 -*-
"""
Patch file verification script
Generated at: {{TIMESTAMP}}
"""

import json
import sys
from pathlib import Path

MAX_LISTED = 10


def verify_patch_files(config_file, game_directory):
    """Check that every file listed in the manifest is installed."""

    with open(config_file, 'r', encoding='utf-8') as f:
        config = json.load(f)

    game_path = Path(game_directory)
    missing_files = []
    verified_files = []

    for file_info in config.get('files', []):
        file_path = game_path / file_info['path']

        if file_path.exists():
            verified_files.append(file_info['path'])
        else:
            missing_files.append(file_info['path'])

    print("\nVerification result:")
    print(f"  found:   {len(verified_files)} files")
    print(f"  missing: {len(missing_files)} files")

    if missing_files:
        print("\nMissing files:")
        for path in missing_files[:MAX_LISTED]:
            print(f"  - {path}")
        if len(missing_files) > MAX_LISTED:
            print(f"  ... and {len(missing_files) - MAX_LISTED} more")
        return False

    print("\nAll patch files are installed correctly.")
    return True


if __name__ == "__main__":
    if len(sys.argv) < 2:
        print("usage: python verify_files.py <game directory>")
        sys.exit(1)

    game_dir = sys.argv[1]
    config_file = "{{CONFIG_FILE}}"

    if verify_patch_files(config_file, game_dir):
        sys.exit(0)
    else:
        sys.exit(1)
"#;

/// Render the verification script for `manifest_file`.
///
/// `manifest_file` is embedded verbatim (escaped for a Python string
/// literal) and resolved by the script relative to its working directory.
pub fn render_verification_script(manifest_file: &str, generated_at: DateTime<Local>) -> String {
    TEMPLATE
        .replace("{{TIMESTAMP}}", &generated_at.to_rfc3339())
        .replace("{{CONFIG_FILE}}", &escape_python_str(manifest_file))
}

fn escape_python_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
