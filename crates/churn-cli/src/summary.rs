use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use churn_cli::settings::Settings;
use churn_pipeline::PipelineRun;

pub fn print_summary(settings: &Settings, run: &PipelineRun) {
    println!("Dataset: {}", settings.dataset_name);
    println!("Project root: {}", settings.project_root.display());
    if let Some(path) = &settings.config_file {
        println!("Settings: {}", path.display());
    }
    println!("{}", summary_table(run));
    println!("Final state: {}", run.state);
}

fn summary_table(run: &PipelineRun) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Stage"),
        header_cell("Artifact"),
        header_cell("Duration"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for (index, report) in run.stages.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(report.kind).fg(Color::Green),
            Cell::new(report.artifact.path().display()),
            Cell::new(format!("{} ms", report.duration.as_millis())),
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
