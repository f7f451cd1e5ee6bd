use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tt_model::{ConflictKind, Resolution, ScheduleMode, Suggestion};

use crate::types::{BatchesResult, CheckResult, RosterReport, ScanEntry};

pub fn print_batches_summary(result: &BatchesResult) {
    println!("Output: {}", result.output.display());
    println!(
        "Batch size: {} ({:?} codes)",
        result.options.batch_size, result.options.batch_code_style
    );
    if result.table.is_empty() {
        println!("No students found; the batch table is empty.");
        print_errors(&result.errors);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Subject"),
        header_cell("Students"),
        header_cell("Batches"),
        header_cell("Last batch"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let sizes = result.table.batch_sizes();
    let mut total_students = 0usize;
    let mut total_batches = 0usize;
    for (subject, (students, batches)) in result.table.subject_summary() {
        total_students += students;
        total_batches += batches;
        let last = result
            .table
            .rows
            .iter()
            .rev()
            .find(|row| row.subject == *subject)
            .and_then(|row| sizes.get(&row.batch))
            .copied()
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(subject)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(students),
            Cell::new(batches),
            dim_cell(last),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_students).add_attribute(Attribute::Bold),
        Cell::new(total_batches).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_errors(&result.errors);
}

pub fn print_check_summary(result: &CheckResult) {
    let outcome = &result.outcome;
    let detection = &outcome.detection;
    println!("Timetable: {} ({} mode)", result.timetable.display(), outcome.mode.as_str());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if let Some(batches) = &result.batches {
        table.add_row(vec![Cell::new("Batches formed"), Cell::new(batches.batch_count())]);
    }
    table.add_row(vec![Cell::new("Joined sessions"), Cell::new(outcome.joined_rows)]);
    if outcome.mode == ScheduleMode::Direct {
        table.add_row(vec![
            Cell::new("Unscheduled enrollments"),
            count_cell(outcome.unscheduled, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Skipped rows"),
        count_cell(detection.skipped.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new(format!("Conflicts ({})", detection.strategy)),
        count_cell(detection.conflicts.len(), Color::Red),
    ]);
    println!("{table}");

    if detection.is_clean() {
        println!("No conflicts found.");
    } else {
        print_resolution_table(&outcome.resolutions, outcome.mode);
    }

    if !detection.skipped.is_empty() {
        println!();
        println!("Skipped rows:");
        for row in &detection.skipped {
            println!(
                "- row {}: {} / {}: {}",
                row.row, row.roll_no, row.subject, row.reason
            );
        }
    }
    if !result.outputs.is_empty() {
        println!();
        for path in &result.outputs {
            println!("Wrote {}", path.display());
        }
    }
    print_errors(&result.errors);
}

fn print_resolution_table(resolutions: &[Resolution], mode: ScheduleMode) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Student"), header_cell("Day")];
    match mode {
        ScheduleMode::Direct => header.extend([
            header_cell("Subject 1"),
            header_cell("Subject 2"),
            header_cell("Time 1"),
            header_cell("Time 2"),
        ]),
        ScheduleMode::Grid => header.extend([header_cell("Time Slot"), header_cell("Batches")]),
    }
    header.extend([header_cell("Suggested Day"), header_cell("Suggested Time")]);
    table.set_header(header);
    apply_table_style(&mut table);

    for resolution in resolutions {
        let conflict = &resolution.conflict;
        let mut row = vec![Cell::new(&conflict.roll_no), Cell::new(conflict.day)];
        match &conflict.kind {
            ConflictKind::Overlap { first, second } => row.extend([
                Cell::new(&first.label),
                Cell::new(&second.label).fg(Color::Yellow),
                Cell::new(first.time),
                Cell::new(second.time),
            ]),
            ConflictKind::SharedCell { time_slot, .. } => row.extend([
                Cell::new(time_slot),
                Cell::new(conflict.batch_list().unwrap_or_default()).fg(Color::Yellow),
            ]),
        }
        row.extend(suggestion_cells(&resolution.suggestion));
        table.add_row(row);
    }
    println!();
    println!("Conflicts and suggested resolutions:");
    println!("{table}");
}

fn suggestion_cells(suggestion: &Suggestion) -> [Cell; 2] {
    match suggestion {
        Suggestion::Alternative { day, time } => [
            Cell::new(day).fg(Color::Green),
            Cell::new(time).fg(Color::Green),
        ],
        Suggestion::NoAlternative => [
            dim_cell(suggestion.day_label()),
            dim_cell(suggestion.time_label()),
        ],
    }
}

pub fn print_roster_report(report: &RosterReport) {
    println!("Roster: {}", report.path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Header row"), Cell::new(report.header_row)]);
    table.add_row(vec![Cell::new("Data rows"), Cell::new(report.rows)]);
    table.add_row(vec![
        Cell::new("Subject"),
        match (&report.subject, report.has_subject_column) {
            (_, true) => Cell::new("per row (subject column)"),
            (Some(subject), false) => Cell::new(format!("{subject} (from file name)")),
            (None, false) => dim_cell("-"),
        },
    ]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(report.columns.join(", "))]);
    println!("{table}");
}

pub fn print_scan(entries: &[ScanEntry]) {
    if entries.is_empty() {
        println!("No roster files found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Subject")]);
    apply_table_style(&mut table);
    for entry in entries {
        let name = entry
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(name),
            match &entry.subject {
                Some(subject) => Cell::new(subject).fg(Color::Blue),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for error in errors {
        eprintln!("- {error}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
