//! Command-line interface and command implementations.

use crate::shortcuts::ShortcutRegistry;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use floorplan_core::units::grid_size_label;
use floorplan_core::{
    EditorConfig, EditorSession, Entity, LayoutStorage, SaveOptions, SettingsPatch, Units,
    format_dimension,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "floorplan", version, about = "Manage scaled floorplan layouts")]
pub struct Cli {
    /// Directory holding layout documents.
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Config file to use instead of the discovered one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List saved layouts, newest first.
    List,
    /// Create an empty layout.
    New {
        name: String,
        /// Display units (ft-in or meters).
        #[arg(long)]
        units: Option<Units>,
        /// Display scale in pixels per inch.
        #[arg(long)]
        scale: Option<f64>,
    },
    /// Print a layout's settings and entities.
    Show { slug: String },
    /// Delete a layout.
    Delete { slug: String },
    /// Print the object preset library.
    Presets,
    /// Print the editor's keyboard shortcuts.
    Shortcuts,
}

/// Run one command against `storage`, writing its report to `out`.
pub fn run<S: LayoutStorage>(
    command: Command,
    config: &EditorConfig,
    storage: &S,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List => list(storage, out),
        Command::New { name, units, scale } => create(&name, units, scale, config, storage, out),
        Command::Show { slug } => show(&slug, storage, out),
        Command::Delete { slug } => {
            pollster::block_on(storage.delete(&slug))
                .with_context(|| format!("Failed to delete {}", slug))?;
            writeln!(out, "Deleted {}", slug)?;
            Ok(())
        }
        Command::Presets => presets(storage, out),
        Command::Shortcuts => {
            ShortcutRegistry::write_all(out)?;
            Ok(())
        }
    }
}

fn list<S: LayoutStorage>(storage: &S, out: &mut impl Write) -> anyhow::Result<()> {
    let summaries = pollster::block_on(storage.list()).context("Failed to list layouts")?;
    if summaries.is_empty() {
        writeln!(out, "No layouts")?;
        return Ok(());
    }
    for summary in summaries {
        writeln!(
            out,
            "{:24} {:24} {:>5} {}",
            summary.slug,
            summary.name,
            summary.entity_count,
            summary.updated_at.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

fn create<S: LayoutStorage>(
    name: &str,
    units: Option<Units>,
    scale: Option<f64>,
    config: &EditorConfig,
    storage: &S,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut session = EditorSession::new(config.clone());
    session.new_layout(name);
    session.update_settings(&SettingsPatch {
        units,
        scale,
        ..Default::default()
    });

    let Some(ticket) = session.begin_save() else {
        bail!("No layout to save");
    };
    if ticket.slug.is_empty() {
        bail!("Layout name {:?} has no usable characters", name);
    }
    if pollster::block_on(storage.exists(&ticket.slug))? {
        bail!("Layout {} already exists", ticket.slug);
    }

    let slug = ticket.slug.clone();
    let result = pollster::block_on(storage.save(&slug, &ticket.layout, SaveOptions::default()));
    let saved = session.complete_save(ticket, &result);
    result.with_context(|| format!("Failed to save {}", slug))?;
    log::debug!("Session clean after save: {}", saved);

    writeln!(out, "Created {}", slug)?;
    Ok(())
}

fn show<S: LayoutStorage>(slug: &str, storage: &S, out: &mut impl Write) -> anyhow::Result<()> {
    let layout =
        pollster::block_on(storage.load(slug)).with_context(|| format!("Failed to open {}", slug))?;
    let settings = &layout.settings;
    let units = settings.units;

    writeln!(out, "{} ({})", layout.name, layout.slug)?;
    writeln!(out, "  units:  {}", units)?;
    writeln!(out, "  grid:   {}", grid_size_label(settings.grid_size, units))?;
    writeln!(out, "  scale:  {} px/in", settings.scale)?;
    writeln!(
        out,
        "  page:   {} x {}",
        format_dimension(settings.page_width, units),
        format_dimension(settings.page_height, units)
    )?;
    writeln!(out, "  entities: {}", layout.entities.len())?;

    for entity in &layout.entities {
        writeln!(
            out,
            "    {:10} {}  {}",
            entity.kind().as_str(),
            short_id(entity.id()),
            describe(entity, units)
        )?;
    }
    Ok(())
}

fn presets<S: LayoutStorage>(storage: &S, out: &mut impl Write) -> anyhow::Result<()> {
    let presets = pollster::block_on(storage.get_presets()).context("Failed to read presets")?;
    for (category, items) in presets.categories() {
        if items.is_empty() {
            continue;
        }
        writeln!(out, "{}:", category)?;
        for preset in items {
            writeln!(
                out,
                "  {:28} {} x {}",
                preset.name,
                format_dimension(preset.width, Units::FeetInches),
                format_dimension(preset.height, Units::FeetInches)
            )?;
        }
    }
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// One-line description of an entity with dimensions in `units`.
fn describe(entity: &Entity, units: Units) -> String {
    let dim = |inches: f64| format_dimension(inches, units);
    match entity {
        Entity::Wall(wall) => format!(
            "{} long, {} thick",
            dim(wall.length()),
            dim(wall.thickness)
        ),
        Entity::Door(door) => format!("{} wide on wall {}", dim(door.width), short_id(&door.wall_id)),
        Entity::Window(window) => format!(
            "{} wide on wall {}",
            dim(window.width),
            short_id(&window.wall_id)
        ),
        Entity::Object(object) => format!(
            "{} {} x {}",
            object.object_type,
            dim(object.width),
            dim(object.height)
        ),
        Entity::Text(text) => format!("{:?}", text.text),
        Entity::Dimension(line) => dim(line.length()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::{Layout, MemoryStorage, TextLabel, Wall};
    use kurbo::Point;

    fn run_to_string(command: Command, storage: &MemoryStorage) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(command, &EditorConfig::default(), storage, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_new_with_options() {
        let cli = Cli::try_parse_from([
            "floorplan",
            "--storage-dir",
            "/tmp/plans",
            "new",
            "Lab 4",
            "--units",
            "meters",
        ])
        .unwrap();
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/plans")));
        let Command::New { name, units, scale } = cli.command else {
            panic!("expected new");
        };
        assert_eq!(name, "Lab 4");
        assert_eq!(units, Some(Units::Meters));
        assert_eq!(scale, None);
    }

    #[test]
    fn test_new_list_delete() {
        let storage = MemoryStorage::new();
        let output = run_to_string(
            Command::New {
                name: "Lab 4".to_string(),
                units: None,
                scale: None,
            },
            &storage,
        )
        .unwrap();
        assert_eq!(output, "Created lab-4\n");

        let output = run_to_string(Command::List, &storage).unwrap();
        assert!(output.starts_with("lab-4"));

        run_to_string(Command::Delete { slug: "lab-4".to_string() }, &storage).unwrap();
        let output = run_to_string(Command::List, &storage).unwrap();
        assert_eq!(output, "No layouts\n");
    }

    #[test]
    fn test_new_rejects_existing_and_empty() {
        let storage = MemoryStorage::new();
        let new = |name: &str| Command::New {
            name: name.to_string(),
            units: None,
            scale: None,
        };
        run_to_string(new("Lab"), &storage).unwrap();
        assert!(run_to_string(new("LAB"), &storage).is_err());
        assert!(run_to_string(new("!!!"), &storage).is_err());
    }

    #[test]
    fn test_show_formats_dimensions() {
        let storage = MemoryStorage::new();
        let mut layout = Layout::new("Show Me");
        layout
            .add_entity(Entity::Wall(Wall::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(66.0, 0.0),
            ])))
            .unwrap();
        layout
            .add_entity(Entity::Text(TextLabel::new("Bench", Point::ZERO)))
            .unwrap();
        pollster::block_on(storage.save("show-me", &layout, SaveOptions::default())).unwrap();

        let output = run_to_string(Command::Show { slug: "show-me".to_string() }, &storage).unwrap();
        assert!(output.contains("Show Me (show-me)"));
        assert!(output.contains("5'-6\" long, 6\" thick"));
        assert!(output.contains("\"Bench\""));
        assert!(output.contains("grid:   1 ft"));
    }

    #[test]
    fn test_missing_layout_is_error() {
        let storage = MemoryStorage::new();
        let err = run_to_string(Command::Show { slug: "nope".to_string() }, &storage).unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(run_to_string(Command::Delete { slug: "nope".to_string() }, &storage).is_err());
    }

    #[test]
    fn test_presets_listing() {
        let storage = MemoryStorage::new();
        let output = run_to_string(Command::Presets, &storage).unwrap();
        assert!(output.contains("desks:"));
        assert!(output.contains("Office Chair"));
        assert!(!output.contains("custom:"));
    }
}
