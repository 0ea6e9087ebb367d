//! Basic LRU Cache Usage
//!
//! Walks through the core operations: put, get, delete, clear and the
//! oldest/newest observers.
//!
//! Run with: cargo run --example basic_usage

use recency_cache::config::LruCacheConfig;
use recency_cache::LruCache;

fn print_order(cache: &LruCache<&'static str, u32>) {
    let keys: Vec<&str> = cache.iter().map(|(k, _)| *k).collect();
    println!("   recency (MRU -> LRU): {:?}", keys);
}

fn main() {
    println!("LRU Cache - Basic Usage");
    println!("=======================\n");

    let mut cache: LruCache<&'static str, u32> = LruCache::init(LruCacheConfig { capacity: 3 }, None);
    println!("Created {:?}", cache);

    println!("\n1. Filling the cache");
    for (name, price) in [("apple", 3), ("banana", 1), ("cherry", 7)] {
        cache.put(name, price);
        println!("   put {} = {}", name, price);
    }
    print_order(&cache);

    println!("\n2. get promotes an entry");
    println!("   get apple -> {:?}", cache.get(&"apple"));
    print_order(&cache);

    println!("\n3. put of a new key evicts the least recently used one");
    if let Some((key, value)) = cache.put("damson", 4) {
        println!("   evicted {} = {}", key, value);
    }
    print_order(&cache);

    println!("\n4. Observers never change the order");
    println!("   oldest = {:?}, newest = {:?}", cache.oldest(), cache.newest());
    println!("   peek cherry -> {:?}", cache.peek(&"cherry"));
    print_order(&cache);

    println!("\n5. Overwriting keeps the size");
    cache.put("cherry", 8);
    println!("   size = {} / capacity = {}", cache.len(), cache.cap());
    print_order(&cache);

    println!("\n6. Delete and clear");
    println!("   delete banana -> {}", cache.delete(&"banana"));
    println!("   delete banana again -> {}", cache.delete(&"banana"));
    cache.clear();
    println!("   after clear: size = {}, oldest = {:?}", cache.len(), cache.oldest());

    println!("\n7. Capacity below 1 is clamped, or rejected on the fallible path");
    let clamped: LruCache<u32, u32> = LruCache::new(0);
    println!("   LruCache::new(0).cap() = {}", clamped.cap());
    match LruCache::<u32, u32>::try_new(0) {
        Ok(_) => println!("   try_new(0) unexpectedly succeeded"),
        Err(err) => println!("   try_new(0) -> error: {}", err),
    }
}
