#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use segtrie::segment::{segments, PathSegmenter};
use segtrie::tree::PathTrie;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Put { key: Vec<u8>, val: usize },
    Delete { key: Vec<u8> },
    Merge,
}

// Small alphabet so keys share prefixes and collide often.
fn to_path(raw: &[u8]) -> String {
    raw.iter()
        .take(8)
        .map(|b| match b % 4 {
            0 => "/a",
            1 => "/b",
            2 => "/c",
            _ => "/",
        })
        .collect()
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut trie = PathTrie::<usize>::new();
    let mut map = HashMap::<String, usize>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                let key = to_path(key);
                assert_eq!(trie.get(&key), map.get(&key), "get {key:?}");

                let mut chain = Vec::new();
                trie.walk_path(&key, |k, v| -> Result<(), ()> {
                    chain.push((k.to_string(), *v));
                    Ok(())
                })
                .unwrap();
                let mut prefix = String::new();
                let mut expected: Vec<(String, usize)> =
                    map.get("").map(|v| (String::new(), *v)).into_iter().collect();
                for part in segments(&PathSegmenter, &key) {
                    prefix.push_str(part);
                    if let Some(v) = map.get(&prefix) {
                        expected.push((prefix.clone(), *v));
                    }
                }
                assert_eq!(chain, expected, "walk_path {key:?}");
            }
            MapMethod::Put { key, val } => {
                let key = to_path(key);
                let inserted = trie.put(&key, *val);
                eprintln!("Put: {:?} {:?} {:?}", key, val, inserted);
                assert_eq!(inserted, map.insert(key, *val).is_none());
            }
            MapMethod::Delete { key } => {
                let key = to_path(key);
                let deleted = trie.delete(&key);
                eprintln!("Delete: {:?} {:?}", key, deleted);
                assert_eq!(deleted, map.remove(&key).is_some());
            }
            MapMethod::Merge => trie.merge(),
        }
    }

    let mut walked = HashMap::new();
    trie.walk(|k, v| -> Result<(), ()> {
        assert!(walked.insert(k.to_string(), *v).is_none(), "{k:?} walked twice");
        Ok(())
    })
    .unwrap();
    assert_eq!(walked, map);
});
