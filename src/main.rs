use avl_collections::avl_tree::AvlTree;
use log::{error, info, LevelFilter};
use rand::Rng;
use simplelog::{Config, SimpleLogger};
use std::env;
use std::io::{self, BufRead};

fn parse_key(arg: Option<&str>) -> Option<i32> {
    match arg.map(str::parse::<i32>) {
        Some(Ok(key)) => Some(key),
        _ => {
            error!("expected an integer key, got {:?}", arg);
            None
        },
    }
}

fn main() {
    let level = env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if SimpleLogger::init(level, Config::default()).is_err() {
        eprintln!("logger was already initialized");
    }

    let mut tree = AvlTree::new();
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("failed to read input: {}", err);
                break;
            },
        };
        let mut args = line.trim().splitn(2, ' ');
        match args.next() {
            Some("insert") => {
                if let Some(key) = parse_key(args.next()) {
                    println!("{}", tree.insert(key));
                }
            },
            Some("delete") => {
                if let Some(key) = parse_key(args.next()) {
                    println!("{}", tree.delete(&key));
                }
            },
            Some("contains") => {
                if let Some(key) = parse_key(args.next()) {
                    println!("{}", tree.contains(&key));
                }
            },
            Some("fill") => {
                if let Some(count) = parse_key(args.next()) {
                    let mut rng = rand::thread_rng();
                    let inserted = (0..count)
                        .filter(|_| tree.insert(rng.gen_range(-1000, 1000)))
                        .count();
                    info!("inserted {} random keys", inserted);
                }
            },
            Some("height") => println!("{}", tree.height()),
            Some("size") => println!("{}", tree.size()),
            Some("print") => println!("{}", tree),
            Some("serialize") => println!("{}", tree.serialize()),
            Some("load") => match AvlTree::deserialize(args.next().unwrap_or("")) {
                Ok(loaded) => {
                    info!("loaded {} keys", loaded.len());
                    tree = loaded;
                },
                Err(err) => error!("failed to load tree: {}", err),
            },
            Some("quit") => break,
            Some("") | None => {},
            Some(command) => error!("unknown command `{}`", command),
        }
    }
}
