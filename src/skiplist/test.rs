mod skiplist_test {
    use std::collections::HashMap;
    use std::time::{Duration, Instant};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::leaderboard::Player;
    use crate::skiplist::{LevelGenerator, NodeId, SkipList, SKIP_LIST_MAX_LEVEL};

    fn base_time() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    fn player(id: &str, score: i64, ts: Instant) -> Player {
        Player::new(id, score, ts)
    }

    fn ids(zsl: &SkipList) -> Vec<String> {
        zsl.iter().map(|p| p.player_id.clone()).collect()
    }

    /// Every level is ordered and is a subsequence of level 0, and the
    /// nodes on level `i` are exactly those taller than `i`.
    fn check_levels(zsl: &SkipList) {
        let base: Vec<&Player> = zsl.iter().collect();
        assert_eq!(base.len(), zsl.len());
        for w in base.windows(2) {
            assert!(!w[1].before(w[0]), "level 0 out of order");
        }
        for level in 1..SKIP_LIST_MAX_LEVEL {
            let chain: Vec<&Player> = zsl.iter_level(level).collect();
            if level >= zsl.level() {
                assert!(chain.is_empty(), "links above the top level");
                continue;
            }
            let mut cursor = base.iter();
            for p in &chain {
                assert!(cursor.any(|q| q.player_id == p.player_id), "level {level} not a subsequence");
            }
        }
        let top: usize = (0..zsl.level())
            .filter(|&l| zsl.iter_level(l).next().is_some())
            .count();
        assert!(zsl.is_empty() || top == zsl.level(), "top level is empty");
    }

    #[test]
    fn skiplist_insert() {
        let t0 = base_time();
        let mut zsl = SkipList::with_generator(LevelGenerator::with_seed(7));

        print!("[TEST] Insert keeps ranking order: ");
        zsl.insert(player("c", 50, t0));
        zsl.insert(player("a", 90, t0));
        zsl.insert(player("b", 70, t0));
        zsl.insert(player("d", 10, t0));
        assert_eq!(ids(&zsl), ["a", "b", "c", "d"]);
        check_levels(&zsl);
        println!("PASS");

        print!("[TEST] Equal score orders by timestamp: ");
        zsl.insert(player("late", 70, t0 + Duration::from_secs(5)));
        zsl.insert(player("early", 70, t0 - Duration::from_secs(5)));
        assert_eq!(ids(&zsl), ["a", "early", "b", "late", "c", "d"]);
        check_levels(&zsl);
        println!("PASS");
    }

    #[test]
    fn skiplist_equal_keys_insert_in_front() {
        let t0 = base_time();
        let mut zsl = SkipList::with_generator(LevelGenerator::with_seed(1));
        zsl.insert(player("first", 5, t0));
        zsl.insert(player("second", 5, t0));
        assert_eq!(ids(&zsl), ["second", "first"]);
    }

    #[test]
    fn skiplist_position() {
        let t0 = base_time();
        let mut zsl = SkipList::with_generator(LevelGenerator::with_seed(3));
        let handles: Vec<NodeId> = (0..100)
            .map(|i| zsl.insert(player(&i.to_string(), i, t0)))
            .collect();
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(zsl.position(*handle), Some(99 - i));
        }
        assert_eq!(zsl.player(handles[42]).unwrap().score, 42);
    }

    #[test]
    fn skiplist_delete() {
        let t0 = base_time();
        let mut zsl = SkipList::with_generator(LevelGenerator::with_seed(11));
        let num = 2000i64;
        let handles: Vec<NodeId> = (0..num)
            .map(|i| zsl.insert(player(&i.to_string(), i % 37, t0)))
            .collect();
        check_levels(&zsl);

        print!("[TEST] Delete every odd node: ");
        for (i, handle) in handles.iter().enumerate() {
            if i % 2 == 1 {
                let removed = zsl.delete_node(*handle).unwrap();
                assert_eq!(removed.player_id, i.to_string());
            }
        }
        assert_eq!(zsl.len(), (num / 2) as usize);
        assert!(zsl.iter().all(|p| p.player_id.parse::<i64>().unwrap() % 2 == 0));
        check_levels(&zsl);
        println!("PASS");

        print!("[TEST] Delete the rest: ");
        assert!(zsl.delete_node(handles[1]).is_none());
        for handle in handles.iter().step_by(2) {
            assert!(zsl.delete_node(*handle).is_some());
        }
        assert!(zsl.is_empty());
        assert_eq!(zsl.level(), 1);
        assert_eq!(zsl.first(), None);
        check_levels(&zsl);
        println!("PASS");
    }

    #[test]
    fn skiplist_random_churn() {
        let t0 = base_time();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut zsl = SkipList::with_generator(LevelGenerator::with_seed(99));
        let mut live: HashMap<String, NodeId> = HashMap::new();

        for round in 0..5000u64 {
            let id = format!("p{}", rng.random_range(0..300));
            let score = rng.random_range(-20..20);
            let ts = t0 + Duration::from_millis(rng.random_range(0..5));
            if let Some(old) = live.remove(&id) {
                assert_eq!(zsl.delete_node(old).unwrap().player_id, id);
            }
            let handle = zsl.insert(player(&id, score, ts));
            live.insert(id, handle);
            if round % 500 == 0 {
                check_levels(&zsl);
            }
        }
        assert_eq!(zsl.len(), live.len());
        check_levels(&zsl);
    }

    #[test]
    fn level_generator() {
        let mut a = LevelGenerator::with_seed(5);
        let mut b = LevelGenerator::with_seed(5);
        let draws_a: Vec<usize> = (0..1000).map(|_| a.random_level()).collect();
        let draws_b: Vec<usize> = (0..1000).map(|_| b.random_level()).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|&l| (1..=SKIP_LIST_MAX_LEVEL).contains(&l)));
        // p = 0.25 puts roughly three quarters of the nodes on level 1 only
        let ones = draws_a.iter().filter(|&&l| l == 1).count();
        assert!(ones > 650 && ones < 850, "{ones}");

        let mut flat = LevelGenerator::new(1, 0.99, Some(1));
        assert!((0..100).all(|_| flat.random_level() == 1));
        assert_eq!(LevelGenerator::new(64, 0.25, None).max_level(), SKIP_LIST_MAX_LEVEL);
        assert_eq!(LevelGenerator::new(0, 0.25, None).max_level(), 1);
    }
}
