use log::{info, warn};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use rbindex::RbTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "inserts", default_value = "0")]
    inserts: usize,

    #[structopt(long = "deletes", default_value = "0")]
    deletes: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "validate")]
    validate: bool,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();

    let res = TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if let Err(err) = res {
        eprintln!("logger init failed: {}", err);
    }

    let seed = opts.seed.unwrap_or_else(random);
    info!("seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u64> = RbTree::new();

    // initial load
    let start = time::Instant::now();
    let (mut dups, mut loaded) = (0, Vec::with_capacity(opts.loads));
    for _i in 0..opts.loads {
        let (key, val): (i64, u64) = (rng.gen(), rng.gen());
        match index.insert(key, val) {
            true => loaded.push(key),
            false => dups += 1,
        }
    }
    info!(
        "loaded {} items in {:?}, {} duplicates",
        index.len(),
        start.elapsed(),
        dups
    );

    do_incremental(&mut rng, &opts, &mut index, &loaded);

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("iterated {} items in {:?}", n, start.elapsed());

    if opts.validate {
        match index.validate() {
            Ok(stats) => info!("validated {:?}", stats),
            Err(err) => warn!("validate failed: {}", err),
        }
    }

    let start = time::Instant::now();
    let mut released = 0;
    index.destroy_with(|_key, _value| released += 1);
    info!("released {} items in {:?}", released, start.elapsed());
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RbTree<u64>, loaded: &[i64]) {
    let total = opts.inserts + opts.deletes + opts.gets;
    if total == 0 {
        return;
    }

    let start = time::Instant::now();
    let (mut inserted, mut deleted, mut found) = (0, 0, 0);
    for _i in 0..total {
        let op = rng.gen::<usize>() % total;

        // half of the operations target keys from the initial load.
        let key = match rng.gen::<bool>() && !loaded.is_empty() {
            true => loaded[rng.gen::<usize>() % loaded.len()],
            false => rng.gen::<i64>(),
        };

        if op < opts.inserts {
            if index.insert(key, rng.gen()) {
                inserted += 1;
            }
        } else if op < (opts.inserts + opts.deletes) {
            if index.delete(key) {
                deleted += 1;
            }
        } else if index.contains(key) {
            found += 1;
        }
    }

    info!(
        "incremental {} operations took {:?}, inserted:{} deleted:{} found:{}",
        total,
        start.elapsed(),
        inserted,
        deleted,
        found
    );
}
