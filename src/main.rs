// timetable-render: render timetables, days, grade sheets and demotivators

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;

use timetable_render::schedule::read_json;
use timetable_render::theme::parse_hex_color;
use timetable_render::{
    load_photo, pick_caption, random_file_name, Caption, Composer, Day, DaySelector, FontSizes,
    Geometry, RenderError, Result, SubjectGrades, Theme, ThemeField, Timetable, Typography,
};

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render class timetables into themed images")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Font file (TTF/OTF); defaults to the bundled DejaVu Sans
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Theme color as FIELD=HEX (fore, back, teacher, time); repeatable
    #[arg(short, long = "color", value_name = "FIELD=HEX", global = true)]
    colors: Vec<String>,

    /// Output filename (defaults to a random name)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full week timetable
    Week {
        /// Timetable JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Week layout
        #[arg(long, value_enum, default_value = "wide")]
        layout: WeekLayout,
    },
    /// Single day
    Day {
        /// Day JSON file, or a timetable JSON file when --day is given
        #[arg(short, long)]
        input: PathBuf,

        /// today, tomorrow or a weekday name (English or Russian)
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Grade sheet
    Grades {
        /// JSON array of subject records
        #[arg(short, long)]
        input: PathBuf,

        /// Sheet title
        #[arg(long, default_value = "Успеваемость")]
        title: String,
    },
    /// Demotivator per photo
    Dm {
        /// Photo file path or URL; repeatable, one image per photo
        #[arg(short, long = "photo", required = true)]
        photos: Vec<String>,

        /// Upper caption line
        #[arg(long, default_value = "")]
        title: String,

        /// Lower caption line
        #[arg(long, default_value = "")]
        text: String,

        /// JSON caption pool used when no caption is given
        #[arg(long)]
        captions: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WeekLayout {
    Wide,
    Compact,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let typography = match &args.font {
        Some(path) => Typography::from_file(path, FontSizes::default())?,
        None => Typography::embedded()?,
    };
    let composer = Composer::new(typography);
    let theme = parse_theme(&args.colors)?;

    let single_output = || {
        args.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(random_file_name("png")))
    };

    let generated = match &args.command {
        Command::Week { input, layout } => {
            let timetable: Timetable = read_json(input)?;
            let geometry = match layout {
                WeekLayout::Wide => Geometry::week_wide(),
                WeekLayout::Compact => Geometry::week_compact(),
            };
            let output_file = single_output();
            composer.week(&timetable, &theme, &geometry).save(&output_file)?;
            vec![(output_file, format!("Week: {}", timetable.week_number))]
        }
        Command::Day { input, day } => {
            let day = load_day(input, day.as_deref())?;
            let output_file = single_output();
            composer.day(&day, &theme, &Geometry::day()).save(&output_file)?;
            vec![(
                output_file,
                format!("Day: {} ({} lessons)", day.title, day.lessons.len()),
            )]
        }
        Command::Grades { input, title } => {
            let subjects: Vec<SubjectGrades> = read_json(input)?;
            let output_file = single_output();
            composer.grades(title, &subjects, &theme).save(&output_file)?;
            vec![(output_file, format!("Subjects: {}", subjects.len()))]
        }
        Command::Dm {
            photos,
            title,
            text,
            captions,
        } => {
            let pool: Vec<Caption> = match captions {
                Some(path) => read_json(path)?,
                None => Vec::new(),
            };
            let mut rng = rand::rng();
            let mut generated = Vec::with_capacity(photos.len());
            for (index, photo) in photos.iter().enumerate() {
                let caption = pick_caption(Caption::new(title, text), &pool, &mut rng)?;
                let image = load_photo(photo)?;
                let output_file = batch_output(args.output.as_deref(), index, photos.len());
                composer.demotivator(&image, &caption).save(&output_file)?;
                generated.push((
                    output_file,
                    format!("Caption: {} / {}", caption.title, caption.text),
                ));
            }
            generated
        }
    };

    for (output_file, summary) in &generated {
        println!("✓ Generated: {}", output_file.display());
        println!("  {}", summary);
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_theme(colors: &[String]) -> Result<Theme> {
    let mut theme = Theme::default();
    for entry in colors {
        let (field, hex) = entry
            .split_once('=')
            .ok_or_else(|| {
                RenderError::ColorError(format!("expected FIELD=HEX, got '{}'", entry))
            })?;
        let field: ThemeField = field.parse()?;
        theme.set(field, parse_hex_color(hex)?);
    }
    Ok(theme)
}

/// Output path of photo `index` out of `count`: the given path for a single
/// photo, `stem-N.ext` for a batch, a random name when none is given.
fn batch_output(output: Option<&Path>, index: usize, count: usize) -> PathBuf {
    let Some(output) = output else {
        return PathBuf::from(random_file_name("png"));
    };
    if count == 1 {
        return output.to_path_buf();
    }

    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    let name = match output.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index + 1, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index + 1),
    };
    output.with_file_name(name)
}

fn load_day(input: &Path, selector: Option<&str>) -> Result<Day> {
    let Some(selector) = selector else {
        return read_json(input);
    };

    let selector: DaySelector = selector.parse()?;
    let timetable: Timetable = read_json(input)?;
    let resolved = selector.resolve(Local::now().weekday());
    if resolved.next_week {
        warn!(
            "{} falls in the week after {}; using day {} of the given timetable",
            selector, timetable.week_number, resolved.index
        );
    }
    timetable.day(resolved.index).cloned().ok_or_else(|| {
        RenderError::ScheduleError(format!(
            "week {} has no day {}",
            timetable.week_number, resolved.index
        ))
    })
}
