//! End-to-end behaviour of `PathTrie` through the public API.

use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use segtrie::segment::{segments, PathSegmenter, Segmenter, SegmenterKind};
use segtrie::stats::TreeStatsTrait;
use segtrie::tree::{PathTrie, PathTrieConfig};
use segtrie::TrieTrait;

fn collect<T: TrieTrait<i32>>(trie: &T) -> BTreeMap<String, i32> {
    let mut seen = BTreeMap::new();
    trie.walk(|k, v| -> Result<(), String> {
        if seen.insert(k.to_string(), *v).is_some() {
            return Err(format!("{k} visited twice"));
        }
        Ok(())
    })
    .unwrap();
    seen
}

fn chain(trie: &PathTrie<u32>, key: &str) -> Vec<(String, u32)> {
    let mut visited = Vec::new();
    trie.walk_path(key, |k, v| -> Result<(), ()> {
        visited.push((k.to_string(), *v));
        Ok(())
    })
    .unwrap();
    visited
}

// Every stored prefix of `key` that ends on a segment boundary, shortest first.
fn expected_chain(model: &HashMap<String, u32>, key: &str) -> Vec<(String, u32)> {
    let mut prefix = String::new();
    let mut expected: Vec<(String, u32)> = model
        .get("")
        .map(|v| (String::new(), *v))
        .into_iter()
        .collect();
    for part in segments(&PathSegmenter, key) {
        prefix.push_str(part);
        if let Some(v) = model.get(&prefix) {
            expected.push((prefix.clone(), *v));
        }
    }
    expected
}

#[test]
fn test_end_to_end_example() {
    let mut trie = PathTrie::<i32>::new();
    trie.put("/a/b", 1);
    trie.put("/a/c", 2);
    trie.put("/a", 3);

    assert_eq!(trie.get_or_default("/a"), 3);
    assert_eq!(trie.get_or_default("/a/b"), 1);
    assert_eq!(trie.get_or_default("/a/x"), 0);

    let expected: BTreeMap<String, i32> = [("/a", 3), ("/a/b", 1), ("/a/c", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(collect(&trie), expected);
}

#[test]
fn test_trie_trait_usage() {
    fn exercise<T: TrieTrait<i32>>(trie: &mut T) {
        assert!(trie.put("/x/y", 1));
        assert!(!trie.put("/x/y", 2));
        assert_eq!(trie.get("/x/y"), Some(&2));
        assert!(trie.delete("/x/y"));
        assert!(!trie.delete("/x/y"));
        assert_eq!(trie.get("/x/y"), None);

        trie.put("/x", 5);
        trie.put("/x/y/z", 6);
        let mut chain = Vec::new();
        trie.walk_path("/x/y/z", |k, v| -> Result<(), ()> {
            chain.push((k.to_string(), *v));
            Ok(())
        })
        .unwrap();
        assert_eq!(chain, vec![("/x".to_string(), 5), ("/x/y/z".to_string(), 6)]);
    }

    exercise(&mut PathTrie::<i32>::new());
    exercise(&mut PathTrie::<i32, SegmenterKind>::new());
}

#[test]
fn test_walk_error_is_returned_verbatim() {
    #[derive(Debug, PartialEq)]
    struct Halt(&'static str);

    let mut trie = PathTrie::<i32>::new();
    for key in ["/a", "/b", "/c", "/d"] {
        trie.put(key, 1);
    }
    let mut visited = 0;
    let result = trie.walk(|_, _| {
        visited += 1;
        if visited == 2 {
            return Err(Halt("second"));
        }
        Ok(())
    });
    assert_eq!(result, Err(Halt("second")));
    assert_eq!(visited, 2);
}

#[test]
fn test_delete_never_inserted_leaves_tree_unchanged() {
    let mut trie = PathTrie::<i32>::new();
    trie.put("/a/b/c", 1);
    let before = trie.get_tree_stats();
    assert!(!trie.delete("/a/b"));
    assert!(!trie.delete("/a/b/c/d"));
    assert!(!trie.delete("/q"));
    let after = trie.get_tree_stats();
    assert_eq!(before.num_nodes, after.num_nodes);
    assert_eq!(trie.get("/a/b/c"), Some(&1));
}

#[test]
fn test_pruning_invariant() {
    let mut trie = PathTrie::<i32>::new();
    trie.put("/a/b/c/d", 1);
    trie.put("/a/b/x", 2);
    trie.delete("/a/b/c/d");
    let stats = trie.get_tree_stats();
    // root, "/a", "/b", "/x"
    assert_eq!(stats.num_nodes, 4);
    trie.delete("/a/b/x");
    let stats = trie.get_tree_stats();
    assert_eq!(stats.num_nodes, 1);
    assert!(trie.is_empty());
}

#[test]
fn test_merge_transparent_to_get() {
    let mut rng = thread_rng();
    let mut trie = PathTrie::<i32>::new();
    let mut model = HashMap::new();
    for i in 0..1_000 {
        let depth = rng.gen_range(1..7);
        let key: String = (0..depth)
            .map(|_| format!("/{}", rng.gen_range(0..4)))
            .collect();
        trie.put(&key, i);
        model.insert(key, i);
    }
    let before = trie.get_tree_stats();
    trie.merge();
    let after = trie.get_tree_stats();
    assert!(after.num_nodes <= before.num_nodes);
    assert_eq!(after.num_values, model.len());

    for (k, v) in &model {
        assert_eq!(trie.get(k), Some(v), "{k}");
    }
    let walked: HashMap<String, i32> = collect(&trie).into_iter().collect();
    assert_eq!(walked, model);
}

#[test]
fn test_random_ops_with_merges() {
    let mut rng = thread_rng();
    let mut trie = PathTrie::<u32>::new();
    let mut model = HashMap::new();
    let names = ["a", "b", "c"];

    for i in 0..5_000u32 {
        let depth = rng.gen_range(0..5);
        let key: String = (0..depth)
            .map(|_| format!("/{}", names.choose(&mut rng).unwrap()))
            .collect();
        match rng.gen_range(0..10) {
            0..=5 => assert_eq!(trie.put(&key, i), model.insert(key.clone(), i).is_none()),
            6..=8 => assert_eq!(trie.delete(&key), model.remove(&key).is_some()),
            _ => trie.merge(),
        }
        assert_eq!(trie.get(&key), model.get(&key), "{key}");
        assert_eq!(chain(&trie, &key), expected_chain(&model, &key), "{key}");
    }

    assert_eq!(trie.len(), model.len());
    let iterated: HashMap<String, u32> = trie.iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(iterated, model);
}

#[test]
fn test_recursive_direct_children_on_subtree() {
    let mut trie = PathTrie::<i32>::new();
    trie.put("/a/b/c", 1);
    trie.put("/a/x", 2);
    let a = trie.get_node("/a").unwrap();
    let direct = a.recursive_direct_children();
    let keys: BTreeMap<&str, i32> = direct
        .iter()
        .map(|(k, n)| (k.as_str(), *n.value().unwrap()))
        .collect();
    assert_eq!(keys, BTreeMap::from([("/b/c", 1), ("/x", 2)]));
}

#[test]
fn test_custom_segmenter() {
    // Splits before each colon.
    fn colons(key: &str, start: usize) -> (&str, Option<usize>) {
        SegmenterKind::Separator(':').segment(key, start)
    }

    let mut trie = PathTrie::with_segmenter(colons as fn(&str, usize) -> (&str, Option<usize>));
    trie.put("svc:api:port", 8080);
    trie.put("svc:api", 1);
    assert_eq!(trie.get("svc:api:port"), Some(&8080));
    assert!(trie.child("svc").is_some());

    let mut visited = Vec::new();
    trie.walk_path("svc:api:port", |k, _| -> Result<(), ()> {
        visited.push(k.to_string());
        Ok(())
    })
    .unwrap();
    assert_eq!(visited, vec!["svc:api", "svc:api:port"]);
}

#[test]
fn test_config_from_name() {
    let mut trie =
        PathTrie::<i32, SegmenterKind>::with_config(Some(PathTrieConfig::from_name("rune")));
    trie.put("ab", 1);
    trie.put("ac", 2);
    assert_eq!(trie.num_children(), 1);
    assert_eq!(trie.child("a").map(|n| n.num_children()), Some(2));
}
