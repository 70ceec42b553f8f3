use log::{error, info, LevelFilter};
use ordered_trees::avl_tree::AvlMap;
use ordered_trees::bst::BstMap;
use ordered_trees::red_black_tree::RedBlackMap;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;

const BST_KEYS: [u32; 10] = [7, 3, 10, 1, 5, 9, 12, 4, 6, 11];
const AVL_KEYS: [u32; 6] = [10, 20, 30, 40, 50, 25];
const RED_BLACK_KEYS: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];

fn main() {
    // `-v` logs every rotation and fixup case
    let level = if env::args().any(|arg| arg == "-v") {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        eprintln!("Failed to install terminal logger.");
    }

    let mut bst: BstMap<u32, ()> = BST_KEYS.iter().map(|key| (*key, ())).collect();
    info!("Binary search tree of {:?}:", BST_KEYS);
    println!("{}\n", bst.render(|key, _| key.to_string()));
    bst.remove(&7);
    info!("After removing 7:");
    println!("{}\n", bst.render(|key, _| key.to_string()));

    let avl: AvlMap<u32, ()> = AVL_KEYS.iter().map(|key| (*key, ())).collect();
    info!("AVL tree of {:?} (height {}):", AVL_KEYS, avl.height());
    println!("{}\n", avl.render(|key, _| key.to_string()));

    let red_black: RedBlackMap<u32, ()> = RED_BLACK_KEYS.iter().map(|key| (*key, ())).collect();
    info!("Red black tree of {:?} (height {}):", RED_BLACK_KEYS, red_black.height());
    println!(
        "{}",
        red_black.render(|key, _, color| format!("{}({})", key, color)),
    );

    for result in &[
        bst.check_invariants(),
        avl.check_invariants(),
        red_black.check_invariants(),
    ] {
        if let Err(error) = result {
            error!("Invariant violated: {}", error);
        }
    }
}
