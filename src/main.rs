use std::error::Error;

use clap::{Parser, Subcommand};
use scenegen::{
    evaluate, evaluate_parameter_list,
    generator::{
        Container, GeneratorKind, GeneratorSpec, Packing, PackingPolicy, PlacementRecord, Point,
        Template, generate,
    },
};
use tracing_subscriber::{EnvFilter, fmt};

/// scenegen evaluates safe parameter expressions and generates placement
/// records for granular simulation scenes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print results as JSON, one object per line.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single expression, e.g. `2*math.pi*0.5`.
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Evaluate a parameter list, e.g. `young=2.1e11, nu=0.3`.
    Params { parameters: String },

    /// Generate placement records.
    Generate {
        /// circle, spiral, line, grid or granulo.
        kind: String,

        /// Generator fields as a parameter list, e.g. `count=12, radius=3, cx=0, cy=0`.
        parameters: String,

        /// Radius of the replicated template, copied into loop records.
        #[arg(long)]
        template_radius: Option<f64>,

        /// Deposit a granulometric population into box, disk, drum or couette.
        #[arg(long)]
        container: Option<String>,

        /// Container dimensions as a parameter list, e.g. `lx=1, ly=2`.
        #[arg(long, default_value = "")]
        container_params: String,

        /// Minimum clearance between packed particles.
        #[arg(long)]
        gap: Option<f64>,

        /// Candidate positions tried per packed particle.
        #[arg(long)]
        max_attempts: Option<usize>,
    },
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))
                                                  .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_target(true)
         .with_writer(std::io::stderr)
         .compact()
         .init();

    if let Err(e) = run(args.command, args.json) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command, json: bool) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Eval { expression } => {
            let value = evaluate(&expression)?;
            if json {
                println!("{}", serde_json::json!({ "value": value }));
            } else {
                println!("{value}");
            }
        },
        Command::Params { parameters } => {
            let params = evaluate_parameter_list(&parameters)?;
            if json {
                println!("{}", serde_json::to_string(&params)?);
            } else {
                for (name, value) in params.iter() {
                    println!("{name} = {value}");
                }
            }
        },
        Command::Generate { kind,
                            parameters,
                            template_radius,
                            container,
                            container_params,
                            gap,
                            max_attempts, } => {
            let kind: GeneratorKind = kind.parse()?;
            let params = evaluate_parameter_list(&parameters)?;
            let mut spec = GeneratorSpec::from_parameters(kind, &params, 0)?;

            if let Some(name) = container {
                let GeneratorSpec::Granulo(granulo) = &mut spec else {
                    return Err(format!("--container only applies to granulo, not {kind}").into());
                };
                let container = Container::from_parameters(&name,
                                                           &evaluate_parameter_list(&container_params)?)?;
                let defaults = PackingPolicy::default();
                let policy = PackingPolicy { max_attempts: max_attempts.unwrap_or(defaults.max_attempts),
                                             gap:          gap.unwrap_or(defaults.gap), };
                granulo.packing = Some(Packing::new(container, policy));
            } else if gap.is_some() || max_attempts.is_some() {
                return Err("--gap and --max-attempts require --container".into());
            }

            let templates = [Template::new(Point::origin(), template_radius)];
            let records = generate(spec, &templates[..])?;
            print_records(&records, json)?;
        },
    }
    Ok(())
}

fn print_records(records: &[PlacementRecord], json: bool) -> Result<(), serde_json::Error> {
    if json {
        for record in records {
            println!("{}", serde_json::to_string(record)?);
        }
        return Ok(());
    }

    println!("{:>6}  {:>14}  {:>14}  {:>14}  {:>12}", "index", "x", "y", "z", "size");
    for (i, record) in records.iter().enumerate() {
        let z = record.position.z.map_or_else(|| "-".to_string(), |z| format!("{z:.6}"));
        let size = record.size.map_or_else(|| "-".to_string(), |s| format!("{s:.6}"));
        println!("{i:>6}  {:>14.6}  {:>14.6}  {z:>14}  {size:>12}",
                 record.position.x, record.position.y);
    }
    Ok(())
}
