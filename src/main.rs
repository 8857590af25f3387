use maxrect_packer::*;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const MAX_BIN_SIZE: u32 = 16384;

#[derive(Debug)]
struct Args {
    config: PackerConfig,
    padding: u32,
    sort: SortOrder,
    input_filename_pattern: Option<String>,
    input_path: String,
    output_path: String,
}

fn parse_size(values: Option<clap::Values>) -> Result<Option<[u32; 2]>> {
    if let Some(mut option) = values {
        let w = option.next().ok_or_else(|| str_to_error("missing width"))?.parse::<u32>()?;
        let h = option.next().ok_or_else(|| str_to_error("missing height"))?.parse::<u32>()?;
        if w > MAX_BIN_SIZE || h > MAX_BIN_SIZE {
            return Err(From::from(format!("bin size is too large. ({}, {})", w, h)));
        }
        return Ok(Some([w, h]));
    }
    Ok(None)
}

impl Args {
    fn parse() -> Result<Args> {
        let matches = clap::Command::new("maxrect-packer")
            .about("pack rectangles or image sizes into a single bin and write the layout as json")
            .arg(
                clap::Arg::new("config")
                    .long("config")
                    .short('c')
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("max-size")
                    .long("max-size")
                    .short('s')
                    .value_delimiter(',')
                    .number_of_values(2)
            )
            .arg(
                clap::Arg::new("start-size")
                    .long("start-size")
                    .value_delimiter(',')
                    .number_of_values(2)
            )
            .arg(
                clap::Arg::new("padding")
                    .long("padding")
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("heuristic")
                    .long("heuristic")
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("sort")
                    .long("sort")
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("no-grow")
                    .long("no-grow")
            )
            .arg(
                clap::Arg::new("step-growth")
                    .long("step-growth")
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("input-filename-pattern")
                    .long("input-filename-pattern")
                    .short('p')
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("input-path")
                    .takes_value(true)
                    .required(true)
            )
            .arg(
                clap::Arg::new("output-path")
                    .takes_value(true)
                    .required(true)
            )
            .get_matches();

        let mut config: PackerConfig = match matches.value_of("config") {
            Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            None => PackerConfig::default().with_auto_grow(true),
        };

        if let Some(max_size) = parse_size(matches.values_of("max-size"))? {
            config.max_size = max_size;
        }
        if let Some(size) = parse_size(matches.values_of("start-size"))? {
            config.size = size;
        }
        if let Some(heuristic) = matches.value_of("heuristic") {
            config.heuristic = Heuristic::from_str(heuristic)?;
        }
        if let Some(step) = matches.value_of("step-growth") {
            config.growth = Growth::Step(step.parse::<u32>()?);
        }
        if matches.is_present("no-grow") {
            config.auto_grow = false;
        }

        Ok(Args {
            config,
            padding: matches.value_of("padding").map_or(Ok(0), u32::from_str)?,
            sort: matches.value_of("sort").map_or(Ok(SortOrder::default()), SortOrder::from_str)?,
            input_filename_pattern: matches.value_of("input-filename-pattern").map(String::from),
            input_path: matches.value_of("input-path").ok_or_else(|| str_to_error("input-path missing"))?.to_string(),
            output_path: matches.value_of("output-path").ok_or_else(|| str_to_error("output-path missing"))?.to_string(),
        })
    }
}

fn str_to_error(e: &str) -> Box<dyn std::error::Error> {
    From::from(String::from(e))
}

fn read_image_sizes(dir: &Path, pattern: Option<&Regex>) -> Result<Vec<Rectangle>> {
    let mut input_paths = Vec::<PathBuf>::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        if let Some(regex) = pattern {
            let filename = path.file_name()
                    .ok_or_else(||str_to_error("file_name empty"))?
                    .to_str()
                    .ok_or_else(||str_to_error("OsStr::to_str failed"))?;
            if !regex.is_match(filename) {
                continue;
            }
        }
        input_paths.push(path);
    }
    // read_dir order is platform dependent
    input_paths.sort();

    let mut rects = Vec::with_capacity(input_paths.len());
    for path in input_paths {
        let (width, height) = match image::image_dimensions(&path) {
            Ok(dimensions) => dimensions,
            Err(err) => {
                log::warn!("Skipping {}: {}", path.display(), err);
                continue;
            }
        };
        let name = path.file_name()
                .and_then(|a| a.to_str())
                .ok_or_else(||str_to_error("OsStr::to_str failed"))?;
        match Rectangle::new(name, width, height, ()) {
            Ok(rect) => rects.push(rect),
            Err(err) => log::warn!("Skipping {}: {}", path.display(), err),
        }
    }
    Ok(rects)
}

fn read_rect_list(path: &Path) -> Result<Vec<Rectangle>> {
    let inputs: Vec<InputRect> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let mut rects = Vec::with_capacity(inputs.len());
    for input in inputs {
        rects.push(Rectangle::new(input.name, input.width, input.height, ())?);
    }
    Ok(rects)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse()?;
    let input_path = Path::new(&args.input_path);
    let rects = if input_path.is_dir() {
        let regex_option = args.input_filename_pattern.as_deref().map_or(Ok(None), |a| Regex::new(a).map(Some))?;
        read_image_sizes(input_path, regex_option.as_ref())?
    } else {
        read_rect_list(input_path)?
    };
    log::info!("Read {} rectangles from {}", rects.len(), input_path.display());

    let mut packer = Packer::new(args.config)?;
    let status = packer.place_batch(rects, args.padding, args.sort);
    if let Err(ref err) = status {
        log::error!("{}", err);
    }

    let output = OutputData::from_packer(&packer);
    let writer = BufWriter::new(File::create(&args.output_path)?);
    serde_json::to_writer_pretty(writer, &output)?;
    log::info!(
        "Wrote {} layouts in ({}, {}) to {}",
        output.layouts.len(),
        output.size[0],
        output.size[1],
        args.output_path
    );

    status?;
    Ok(())
}
