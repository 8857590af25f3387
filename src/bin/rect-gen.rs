use maxrect_packer::InputRect;
use rand::Rng;
use std::error;
use std::fs::File;
use std::io::BufWriter;

type Result<T> = std::result::Result<T, Box<dyn error::Error>>;

#[derive(Debug)]
struct Args {
    prefix: String,
    number: usize,
    output: Option<String>,
    width_range: [u32; 2],
    height_range: [u32; 2],
}

fn parse_range(values: Option<clap::Values>, what: &str) -> Result<Option<[u32; 2]>> {
    if let Some(mut range_option) = values {
        let min = range_option.next().ok_or("missing minimum")?.parse::<u32>()?;
        let max = range_option.next().ok_or("missing maximum")?.parse::<u32>()?;
        if min == 0 {
            return Err(From::from(format!("min {} must be positive.", what)));
        }
        if min > max {
            return Err(From::from(format!("min {} is larger than max {}. {} > {}", what, what, min, max)));
        }
        return Ok(Some([min, max]));
    }
    Ok(None)
}

impl Args {
    fn parse() -> Result<Args> {
        let matches = clap::Command::new("rect-gen")
            .about("Generate a json list of random rectangle sizes")
            .arg(
                clap::Arg::new("prefix")
                    .long("prefix")
                    .short('p')
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("number")
                    .long("number")
                    .short('n')
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("output")
                    .long("output")
                    .short('o')
                    .takes_value(true)
            )
            .arg(
                clap::Arg::new("width-range")
                    .long("width-range")
                    .takes_value(true)
                    .value_delimiter(',')
                    .number_of_values(2)
            )
            .arg(
                clap::Arg::new("height-range")
                    .long("height-range")
                    .takes_value(true)
                    .value_delimiter(',')
                    .number_of_values(2)
            )
            .get_matches();

        // default option values
        let mut args = Args {
            prefix: String::from("rect"),
            number: 10,
            output: None,
            width_range: [32, 512],
            height_range: [32, 512],
        };

        if let Some(prefix) = matches.value_of("prefix") {
            args.prefix = String::from(prefix);
        }

        if let Some(number_option) = matches.value_of("number") {
            args.number = number_option.parse::<usize>()?;
        }

        args.output = matches.value_of("output").map(String::from);

        if let Some(width_range) = parse_range(matches.values_of("width-range"), "width")? {
            args.width_range = width_range;
        }

        if let Some(height_range) = parse_range(matches.values_of("height-range"), "height")? {
            args.height_range = height_range;
        }

        return Ok(args);
    }
}

fn rect_gen(args: &Args) -> Vec<InputRect> {
    let mut rng = rand::thread_rng();
    (1..(args.number + 1))
        .map(|i| InputRect {
            name: format!("{}{:03}", args.prefix, i),
            width: rng.gen_range(args.width_range[0]..=args.width_range[1]),
            height: rng.gen_range(args.height_range[0]..=args.height_range[1]),
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse()?;
    let rects = rect_gen(&args);
    log::info!("Generated {} rectangles", rects.len());

    match args.output {
        Some(ref path) => serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &rects)?,
        None => serde_json::to_writer_pretty(std::io::stdout(), &rects)?,
    }

    Ok(())
}
