use std::cmp::Ordering;
use std::fmt::Write;

use chrono::{DateTime, Local};

use common::permissions::{FileDescriptor, OperationKind, PermissionSet, Role};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable size, base 1024, at most two decimals: `0 Bytes`,
/// `1.5 KB`, `2 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Local time for unix seconds, `-` if out of range.
pub fn format_timestamp(unix_seconds: f64) -> String {
    let secs = unix_seconds.trunc() as i64;
    let nanos = (unix_seconds.fract() * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortField {
    Name,
    Size,
    Date,
}

impl SortField {
    /// Dates newest first, everything else ascending.
    pub fn default_order(&self) -> SortOrder {
        match self {
            SortField::Date => SortOrder::Desc,
            SortField::Name | SortField::Size => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Stable sort; names compare case-insensitively.
pub fn sort_files(files: &mut [FileDescriptor], field: SortField, order: SortOrder) {
    files.sort_by(|a, b| {
        let ordering = match field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Size => a.size.cmp(&b.size),
            SortField::Date => a
                .modified
                .partial_cmp(&b.modified)
                .unwrap_or(Ordering::Equal),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

const KINDS: [OperationKind; 4] = [
    OperationKind::View,
    OperationKind::Download,
    OperationKind::Edit,
    OperationKind::Delete,
];

/// `vde-` style: one letter per explicitly granted capability.
fn capability_flags(permissions: &PermissionSet) -> String {
    KINDS
        .iter()
        .map(|kind| match permissions.capability(*kind) {
            Some(true) => match kind {
                OperationKind::View => 'v',
                OperationKind::Download => 'd',
                OperationKind::Edit => 'e',
                OperationKind::Delete => 'x',
            },
            _ => '-',
        })
        .collect()
}

/// Operations `role` may attempt on the file.
fn allowed_actions(permissions: &PermissionSet, role: Role) -> String {
    let actions: Vec<String> = KINDS
        .iter()
        .filter(|kind| permissions.allows(**kind, role))
        .map(|kind| kind.to_string())
        .collect();
    if actions.is_empty() {
        "none".to_string()
    } else {
        actions.join(",")
    }
}

pub fn render_file_list(files: &[FileDescriptor], role: Role) -> String {
    if files.is_empty() {
        return "No files found".to_string();
    }

    let name_width = files
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>10}  {:<19}  {:<4}  {:<6}  ACTIONS",
        "NAME", "SIZE", "MODIFIED", "CAPS", "LOCK",
    );
    for file in files {
        let lock = if file.permissions.is_locked {
            "LOCKED"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>10}  {:<19}  {:<4}  {:<6}  {}",
            file.name,
            format_bytes(file.size),
            format_timestamp(file.modified),
            capability_flags(&file.permissions),
            lock,
            allowed_actions(&file.permissions, role),
        );
    }
    out.truncate(out.trim_end().len());
    out
}
