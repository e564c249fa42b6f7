use core::{cmp::Reverse, time::Duration};
use ramify::{
    partition::{self, Assignment, Branches, Instance},
    Histogram, Logger, Options, Quiet, Search, Tally,
};
use std::{env, fs, io, process::ExitCode};

fn main() -> ExitCode {
    let options = Options::parse(env::args().skip(1));
    let Some(file) = options.file.clone() else {
        return usage("missing problem file");
    };
    let text = match fs::read_to_string(&file) {
        Ok(text) => text,
        Err(error) => return usage(&format!("cannot read {file}: {error}")),
    };
    let instance = match Instance::parse(&text) {
        Ok(instance) => instance,
        Err(error) => return usage(&format!("invalid instance {file}: {error}")),
    };
    if options.histogram {
        solve(
            instance,
            configure(Histogram::new(options.trace.clone(), io::stdout()), &options),
        )
    } else if options.count {
        solve(
            instance,
            configure(Tally::new(options.trace.clone(), io::stdout()), &options),
        )
    } else {
        solve(instance, configure(Quiet::new(), &options))
    }
}

fn configure<L: Logger>(mut logger: L, options: &Options) -> L {
    logger.set_iteration_limit(options.iterations);
    if let Some(millis) = options.millis {
        logger.set_wall_limit(Duration::from_millis(millis));
    }
    logger
}

fn solve<L: Logger>(instance: Instance, logger: L) -> ExitCode {
    let known = instance.known();
    let ceiling = instance.ceiling();
    let root = Assignment::root(instance);
    let branches = Branches::new(root.clone());
    let mut search = Search::new(logger);
    match search.maximize_with(
        root,
        branches,
        Assignment::score,
        partition::prune,
        Some(Reverse(ceiling)),
        partition::render,
    ) {
        Ok(best) => {
            println!("{best}");
            println!("makespan {}", best.tallest());
            match known {
                Some(known) if known == best.tallest() => println!("matches known optimum"),
                Some(known) => println!("known optimum {known}"),
                None => {}
            }
            ExitCode::SUCCESS
        }
        Err(timeout) => {
            eprintln!("{timeout}");
            ExitCode::FAILURE
        }
    }
}

fn usage(reason: &str) -> ExitCode {
    eprintln!("{reason}");
    eprintln!(
        "usage: partition <file> [-timeout=N] [-timeoutMillis=N] [-countlogger] [-histlogger] \
         [-strengthen] [-evts=N] [-stackdepth=N] [-maxstackdepth=N]"
    );
    ExitCode::FAILURE
}
