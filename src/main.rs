use anyhow::Context;
use clap::Parser;

use privmetrics::io::{read_csv, write_csv};
use privmetrics::metrics::{
    closenesses, compute_k_anonymity, compute_l_diversity, compute_t_closeness,
    count_per_group_size, diversities, group_sizes,
};
use privmetrics::suppress::{remove_groups, remove_groups_by_closeness, remove_groups_by_diversity};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file
    #[arg(short, long)]
    input: String,
    /// Output file for the filtered table
    #[arg(short, long)]
    output: Option<String>,
    /// Quasi-identifier column indices (comma-separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    qi: Vec<usize>,
    /// Sensitive attribute column indices (comma-separated)
    #[arg(short, long, value_delimiter = ',', num_args = 0..)]
    sa: Vec<usize>,
    /// Drop groups smaller than this before writing the output
    #[arg(long)]
    min_k: Option<usize>,
    /// Drop groups less diverse than this before writing the output
    #[arg(long)]
    min_l: Option<usize>,
    /// Drop groups farther than this from the overall sensitive-attribute
    /// distribution before writing the output
    #[arg(long)]
    max_t: Option<f64>,
    /// Delimiter for input/output files
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut data = read_csv(&args.input, args.delimiter).context("could not read input file")?;

    let k = compute_k_anonymity(&data.table, &args.qi)?;
    println!("k-anonymity: {}", k);
    println!("group sizes: {:?}", group_sizes(&data.table, &args.qi)?);
    println!(
        "rows per group size: {:?}",
        count_per_group_size(&data.table, &args.qi)?
    );

    if !args.sa.is_empty() {
        let l = compute_l_diversity(&data.table, &args.qi, &args.sa)?;
        println!("l-diversity: {}", l);
        println!(
            "group diversities: {:?}",
            diversities(&data.table, &args.qi, &args.sa)?
        );
        for &col in &args.sa {
            let t = compute_t_closeness(&data.table, &args.qi, col)?;
            println!("t-closeness ({}): {:.5}", data.header[col], t);
            println!(
                "group closenesses ({}): {:?}",
                data.header[col],
                closenesses(&data.table, &args.qi, col)?
            );
        }
    }

    if let Some(k) = args.min_k {
        let removed = remove_groups(&mut data.table, &args.qi, k)?;
        println!("k threshold {}: removed {} rows", k, removed);
    }
    if let Some(l) = args.min_l {
        let removed = remove_groups_by_diversity(&mut data.table, &args.qi, &args.sa, l)?;
        println!("l threshold {}: removed {} rows", l, removed);
    }
    if let Some(t) = args.max_t {
        let &sa = args.sa.first().context("--max-t requires --sa")?;
        let removed = remove_groups_by_closeness(&mut data.table, &args.qi, sa, t)?;
        println!("t threshold {}: removed {} rows", t, removed);
    }

    if let Some(output) = &args.output {
        write_csv(output, &data, args.delimiter).context("could not write output file")?;
    }
    Ok(())
}
