use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use mqrism::{decode, ECLevel, MicroQRBuilder, SymbolNumber, Version};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const RUNS_PER_SYMBOL: u64 = 2000;
const DAMAGE_LEVELS: [usize; 4] = [0, 1, 2, 4];

#[derive(Default)]
struct Stats {
    encode_us: Vec<u128>,
    decode_us: Vec<u128>,
    recovered: HashMap<usize, u128>,
}

fn symbols() -> Vec<(Version, ECLevel)> {
    Version::all()
        .flat_map(|v| {
            [ECLevel::DetectionOnly, ECLevel::L, ECLevel::M, ECLevel::Q]
                .into_iter()
                .filter(move |&e| SymbolNumber::new(v, e).is_some())
                .map(move |e| (v, e))
        })
        .collect()
}

fn random_digits(rng: &mut StdRng, max_len: usize) -> Vec<u8> {
    let len = rng.random_range(1..=max_len);
    (0..len).map(|_| b'0' + rng.random_range(0..10u8)).collect()
}

fn median(v: &mut [u128]) -> u128 {
    if v.is_empty() {
        return 0;
    }
    v.sort_unstable();
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        (v[mid - 1] + v[mid]) / 2
    }
}

fn benchmark() {
    let stats = Arc::new(Mutex::new(HashMap::<String, Stats>::new()));

    symbols().par_iter().for_each(|&(ver, ecl)| {
        let key = format!("M{}-{ecl:?}", *ver);
        let mut rng = StdRng::seed_from_u64(*ver as u64 * 16 + ecl as u64);
        let mut local = Stats::default();

        for _ in 0..RUNS_PER_SYMBOL {
            let data = random_digits(&mut rng, 5);

            let start = Instant::now();
            let code = match MicroQRBuilder::new(&data).version(ver).ec_level(ecl).build() {
                Ok(code) => code,
                Err(e) => {
                    println!("\x1b[1;31m[FAIL]\x1b[0m {key} encode: {e}");
                    continue;
                }
            };
            local.encode_us.push(start.elapsed().as_micros());

            let w = code.width();
            for damage in DAMAGE_LEVELS {
                let mut modules = code.modules().to_vec();
                for i in sample(&mut rng, w * w, damage) {
                    modules[i] ^= 1;
                }

                let start = Instant::now();
                let res = decode(&modules);
                local.decode_us.push(start.elapsed().as_micros());

                if res.is_ok_and(|c| c.data() == data) {
                    *local.recovered.entry(damage).or_default() += 1;
                }
            }
        }

        stats.lock().unwrap().insert(key, local);
    });

    let mut stats = Arc::try_unwrap(stats).unwrap().into_inner().unwrap();
    let mut rows = stats.keys().cloned().collect::<Vec<_>>();
    rows.sort_unstable();

    println!("\nResult ({RUNS_PER_SYMBOL} runs per symbol):");
    print!("{:<12}{:>12}{:>12}", "Symbol", "enc_med_us", "dec_med_us");
    for d in DAMAGE_LEVELS {
        print!("{:>10}", format!("flip {d}"));
    }
    println!();
    for row in rows {
        let s = stats.get_mut(&row).unwrap();
        print!("{row:<12}{:>12}{:>12}", median(&mut s.encode_us), median(&mut s.decode_us));
        for d in DAMAGE_LEVELS {
            print!("{:>10}", s.recovered.get(&d).copied().unwrap_or(0));
        }
        println!();
    }
}

fn main() {
    let start = Instant::now();
    benchmark();
    println!("\nTotal time: {:.2?}", start.elapsed());
}
