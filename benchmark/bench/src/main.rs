use bench::{bench_type_from_str, op_from_char, rank_shape, recording_handle, Report, Shape, BENCH_TYPES};
use clap::Parser;
use iclblas::{FillMode, Side, RUNTIME_CONFIG};

/// Ranks the candidate implementations of one routine for a problem shape
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// number of timed selections
    #[arg(short = 'r', long, default_value_t = 1000)]
    n_repeats: usize,

    /// dim m
    #[arg(short, long, default_value_t = 200)]
    m: i32,

    /// dim n
    #[arg(short, long, default_value_t = 200)]
    n: i32,

    /// dim k
    #[arg(short, long, default_value_t = 200)]
    k: i32,

    #[arg(long, default_value_t = 1)]
    incx: i32,

    #[arg(long, default_value_t = 1)]
    incy: i32,

    // transpose of a and b, e.g. "nt"
    #[arg(short, long, default_value_t = String::from("nn"))]
    t_layout: String,

    /// lower triangle instead of upper
    #[arg(long, default_value_t = false)]
    lower: bool,

    /// symmetric operand on the right
    #[arg(long, default_value_t = false)]
    right: bool,

    // bench type
    #[arg(short, long, default_value_t = String::from("sgemm"))]
    bench_type: String,

    /// print the report as json
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

fn print_report(report: &Report) {
    println!("{} m: {}, n: {}, k: {}", report.routine, report.shape.m, report.shape.n, report.shape.k);
    for (i, c) in report.ranking.iter().enumerate() {
        let fields: Vec<String> =
            c.fields.iter().filter(|(_, v)| *v != 1.0).map(|(f, v)| format!("{}={}", f, v)).collect();
        println!("{:>2} {:<40} {:>8.4} {}", i, c.name, c.total, fields.join(" "));
    }
    println!("select: {:.1} ns", report.select_ns);
}

fn main() {
    let args = Args::parse();
    let Some(bench_type) = bench_type_from_str(&args.bench_type) else {
        let known: Vec<&str> = BENCH_TYPES.iter().map(|(name, _)| *name).collect();
        eprintln!("unknown bench type {}, expected one of {}", args.bench_type, known.join(", "));
        std::process::exit(2);
    };
    let mut layout = args.t_layout.chars();
    let shape = Shape {
        m: args.m,
        n: args.n,
        k: args.k,
        incx: args.incx,
        incy: args.incy,
        transa: op_from_char(layout.next().unwrap_or('n')),
        transb: op_from_char(layout.next().unwrap_or('n')),
        uplo: if args.lower { FillMode::Lower } else { FillMode::Upper },
        side: if args.right { Side::Right } else { Side::Left },
    };

    let handle = recording_handle(&RUNTIME_CONFIG);
    let report = rank_shape(handle.dispatcher(), bench_type, &shape, args.n_repeats);
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}
