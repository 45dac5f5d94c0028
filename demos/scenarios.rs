use clap::Parser;

use robdd::bdd::Bdd;
use robdd::reference::Ref;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Print the indented tree of every diagram.
    #[clap(long)]
    print: bool,

    /// Print the Graphviz source of every diagram.
    #[clap(long)]
    dot: bool,

    /// Log level.
    #[clap(long, value_name = "LEVEL", default_value = "info")]
    log: simplelog::LevelFilter,
}

struct Scenario {
    name: &'static str,
    num_vars: u32,
    build: fn(&Bdd, &[Ref]) -> Ref,
    truth_table: &'static str,
    size: u64,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "XOR(x0, x1)",
        num_vars: 2,
        build: |bdd, x| bdd.apply_xor(x[0], x[1]),
        truth_table: "0110",
        size: 3,
    },
    Scenario {
        name: "AND(x0, x1)",
        num_vars: 2,
        build: |bdd, x| bdd.apply_and(x[0], x[1]),
        truth_table: "1000",
        size: 2,
    },
    Scenario {
        name: "ITE(x0, x1, x2)",
        num_vars: 3,
        build: |bdd, x| bdd.apply_ite(x[0], x[1], x[2]),
        truth_table: "11011000",
        size: 3,
    },
    Scenario {
        name: "ITE(x1, x0, x2)",
        num_vars: 3,
        build: |bdd, x| bdd.apply_ite(x[1], x[0], x[2]),
        truth_table: "10111000",
        size: 4,
    },
    Scenario {
        name: "ITE(x1, x0, x0)",
        num_vars: 3,
        build: |bdd, x| bdd.apply_ite(x[1], x[0], x[0]),
        truth_table: "10101010",
        size: 1,
    },
    Scenario {
        name: "ITE(x0, x0, x0)",
        num_vars: 3,
        build: |bdd, x| bdd.apply_ite(x[0], x[0], x[0]),
        truth_table: "10101010",
        size: 1,
    },
    Scenario {
        name: "ITE(x0, x0, x2)",
        num_vars: 3,
        build: |bdd, x| bdd.apply_ite(x[0], x[0], x[2]),
        truth_table: "11111010",
        size: 2,
    },
    Scenario {
        name: "ITE(x0, ITE(x1, x2, x2), x2)",
        num_vars: 3,
        build: |bdd, x| {
            let inner = bdd.apply_ite(x[1], x[2], x[2]);
            bdd.apply_ite(x[0], inner, x[2])
        },
        truth_table: "11110000",
        size: 1,
    },
];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    let mut failed = 0;

    for scenario in SCENARIOS {
        let bdd = Bdd::new(scenario.num_vars);
        let x: Vec<Ref> = (0..scenario.num_vars).map(|v| bdd.mk_var(v)).collect();
        let f = (scenario.build)(&bdd, &x);

        if args.print {
            println!("{} = {}", scenario.name, bdd.to_bracket_string(f));
            bdd.print(f);
        }
        if args.dot {
            println!("{}", bdd.to_dot(&[f])?);
        }

        let truth_table = bdd.to_truth_table(f).to_string();
        if truth_table == scenario.truth_table {
            println!("{}: truth table {} passed.", scenario.name, truth_table);
        } else {
            println!(
                "{}: truth table {} failed (expected {}).",
                scenario.name, truth_table, scenario.truth_table
            );
            failed += 1;
        }

        let size = bdd.size(f);
        if size == scenario.size {
            println!("{}: size {} passed.", scenario.name, size);
        } else {
            println!("{}: size {} failed (expected {}).", scenario.name, size, scenario.size);
            failed += 1;
        }

        bdd.check_structure()?;
        log::info!("{}: {} nodes in the package", scenario.name, bdd.num_nodes());
    }

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    if failed > 0 {
        color_eyre::eyre::bail!("{} checks failed", failed);
    }
    Ok(())
}
