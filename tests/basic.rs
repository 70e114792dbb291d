use balanced_slab::generic::{
	map::TreeExt, node::Item, Avl, Node, Order, Policy, RedBlack, TreeMap, Unbalanced,
};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use slab::Slab;

const SEED: u64 = 0x7e57_5eed;

type Map<P> = TreeMap<usize, usize, P, Slab<Node<usize, usize, <P as Policy>::Metadata>>>;

fn init_logger() {
	let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, simplelog::Config::default());
}

fn filled<P: Policy>() -> Map<P> {
	let mut map: Map<P> = TreeMap::new();

	for (key, value) in &ITEMS {
		map.insert(*key, *value);
	}

	map
}

fn pre_order<P: Policy>(map: &Map<P>) -> Vec<(usize, usize)> {
	map.traverse(Order::Pre).map(|(k, v)| (*k, *v)).collect()
}

fn insert<P: Policy>() {
	init_logger();
	let mut map: Map<P> = TreeMap::new();

	for (key, value) in &ITEMS {
		assert_eq!(map.insert(*key, *value), None);
		map.validate();
	}

	assert_eq!(map.len(), 100);
}

fn remove<P: Policy>() {
	init_logger();
	let mut map = filled::<P>();

	let mut items = ITEMS;
	let mut rng = SmallRng::seed_from_u64(SEED);
	items.shuffle(&mut rng);

	for (i, (key, value)) in items.iter().enumerate() {
		assert_eq!(map.remove(key), Some(*value));
		assert_eq!(map.remove(key), None);
		map.validate();
		assert_eq!(map.len(), 100 - i - 1);
	}

	assert!(map.is_empty());
	assert_eq!(map.height(), -1);
}

fn remove_and_insert_again<P: Policy>() {
	init_logger();

	for k in 1..ITEMS.len() {
		let mut map: Map<P> = TreeMap::new();

		for (key, value) in ITEMS.iter().take(k) {
			map.insert(*key, *value);
		}

		for (key, value) in ITEMS.iter().take(k) {
			assert_eq!(map.remove_entry(key), Some((*key, *value)));
			map.validate();
			assert_eq!(map.insert(*key, *value), None);
			map.validate();
		}

		assert_eq!(map.len(), k);
	}
}

fn update<P: Policy>() {
	let mut map: Map<P> = TreeMap::new();

	for (key, value) in &ITEMS {
		if key % 2 == 0 {
			map.insert(*key, *value);
		}
	}

	let len = map.len();

	for (key, value) in &ITEMS {
		if key % 2 == 0 {
			assert_eq!(map.insert(*key, 10000 - *value), Some(*value));
			assert_eq!(map.len(), len);
		} else {
			assert!(map.get(key).is_none());
		}
	}

	map.validate();

	for (key, value) in &ITEMS {
		if key % 2 == 0 {
			assert_eq!(map[key], 10000 - *value);
		}
	}
}

fn navigation<P: Policy>() {
	let map = filled::<P>();

	for (key, _) in &ITEMS {
		let id = map.address_of(key).ok().unwrap();

		if let Some(before_id) = map.previous_id(id) {
			assert!(map.item(before_id).key() < key);
			assert_eq!(map.next_id(before_id), Some(id))
		}

		if let Some(after_id) = map.next_id(id) {
			assert!(map.item(after_id).key() > key);
			assert_eq!(map.previous_id(after_id), Some(id))
		}
	}

	let mut sorted: Vec<_> = ITEMS.iter().map(|(k, _)| *k).collect();
	sorted.sort_unstable();
	assert_eq!(map.first_key_value().map(|(k, _)| *k), sorted.first().copied());
	assert_eq!(map.last_key_value().map(|(k, _)| *k), sorted.last().copied());
}

fn insert_at_slots<P: Policy>() {
	let mut map: Map<P> = TreeMap::new();

	for (key, value) in &ITEMS {
		let slot = map.address_of(key).err().unwrap();
		let id = map.insert_at(slot, Item::new(*key, *value));
		assert_eq!(map.item(id).value(), value);
		map.validate();
	}
}

fn pop<P: Policy>() {
	let mut map = filled::<P>();
	let mut sorted = ITEMS;
	sorted.sort_unstable();

	let mut front = sorted.iter();
	while let Some(first) = map.pop_first() {
		assert_eq!(Some(&first), front.next());
		map.validate();

		if let Some(last) = map.pop_last() {
			assert_eq!(Some(&last), front.next_back());
			map.validate();
		}
	}

	assert_eq!(front.next(), None);
}

fn node_limit<P: Policy>() {
	init_logger();
	let mut map: Map<P> = TreeMap::with_node_limit(10);

	for (key, value) in ITEMS.iter().take(10) {
		assert_eq!(map.try_insert(*key, *value).ok(), Some(None));
	}

	let before = pre_order(&map);

	let (key, value) = ITEMS[10];
	let e = map.try_insert(key, value).unwrap_err();
	assert_eq!(e.limit(), 10);
	assert_eq!(e.key(), &key);
	assert_eq!(e.into_inner(), (key, value));
	map.validate();

	assert_eq!(pre_order(&map), before);

	// replacing a value does not need a new node.
	let (key, _) = ITEMS[0];
	assert_eq!(map.try_insert(key, 0).ok(), Some(Some(ITEMS[0].1)));
	assert_eq!(map.len(), 10);

	map.remove(&key);
	assert!(map.try_insert(ITEMS[10].0, ITEMS[10].1).is_ok());
	map.validate();
}

fn lowered_node_limit<P: Policy>() {
	init_logger();
	let mut map = filled::<P>();
	assert_eq!(map.node_limit(), None);

	map.set_node_limit(Some(50));
	assert_eq!(map.node_limit(), Some(50));
	assert_eq!(map.len(), 100);

	let e = map.try_insert(0, 0).unwrap_err();
	assert_eq!(e.limit(), 50);
	assert!(!map.contains_key(&0));

	let (key, value) = ITEMS[42];
	assert_eq!(map.try_insert(key, value + 1).ok(), Some(Some(value)));
	assert_eq!(map[&key], value + 1);
	assert_eq!(map.len(), 100);
	map.validate();

	map.set_node_limit(None);
	assert_eq!(map.try_insert(0, 0).ok(), Some(None));
	assert_eq!(map.len(), 101);
	map.validate();
}

#[test]
fn insert_red_black() {
	insert::<RedBlack>()
}

#[test]
fn insert_avl() {
	insert::<Avl>()
}

#[test]
fn insert_unbalanced() {
	insert::<Unbalanced>()
}

#[test]
fn remove_red_black() {
	remove::<RedBlack>()
}

#[test]
fn remove_avl() {
	remove::<Avl>()
}

#[test]
fn remove_unbalanced() {
	remove::<Unbalanced>()
}

#[test]
fn remove_and_insert_again_red_black() {
	remove_and_insert_again::<RedBlack>()
}

#[test]
fn remove_and_insert_again_avl() {
	remove_and_insert_again::<Avl>()
}

#[test]
fn remove_and_insert_again_unbalanced() {
	remove_and_insert_again::<Unbalanced>()
}

#[test]
fn update_red_black() {
	update::<RedBlack>()
}

#[test]
fn update_avl() {
	update::<Avl>()
}

#[test]
fn update_unbalanced() {
	update::<Unbalanced>()
}

#[test]
fn navigation_red_black() {
	navigation::<RedBlack>()
}

#[test]
fn navigation_avl() {
	navigation::<Avl>()
}

#[test]
fn navigation_unbalanced() {
	navigation::<Unbalanced>()
}

#[test]
fn insert_at_slots_red_black() {
	insert_at_slots::<RedBlack>()
}

#[test]
fn insert_at_slots_avl() {
	insert_at_slots::<Avl>()
}

#[test]
fn insert_at_slots_unbalanced() {
	insert_at_slots::<Unbalanced>()
}

#[test]
fn pop_red_black() {
	pop::<RedBlack>()
}

#[test]
fn pop_avl() {
	pop::<Avl>()
}

#[test]
fn pop_unbalanced() {
	pop::<Unbalanced>()
}

#[test]
fn node_limit_red_black() {
	node_limit::<RedBlack>()
}

#[test]
fn node_limit_avl() {
	node_limit::<Avl>()
}

#[test]
fn node_limit_unbalanced() {
	node_limit::<Unbalanced>()
}

#[test]
fn lowered_node_limit_red_black() {
	lowered_node_limit::<RedBlack>()
}

#[test]
fn lowered_node_limit_avl() {
	lowered_node_limit::<Avl>()
}

const ITEMS: [(usize, usize); 100] = [
	(4223, 5948),
	(8175, 4629),
	(1411, 7458),
	(9208, 4040),
	(1246, 2287),
	(6568, 7583),
	(5426, 491),
	(7850, 8789),
	(2034, 9388),
	(1408, 7331),
	(7346, 5820),
	(9712, 4253),
	(5430, 7253),
	(1662, 5278),
	(9322, 777),
	(9256, 8116),
	(7971, 8071),
	(648, 3082),
	(7510, 2207),
	(8394, 7839),
	(57, 8834),
	(7770, 5437),
	(6388, 6755),
	(9177, 9904),
	(6487, 5143),
	(2231, 688),
	(7389, 4472),
	(577, 1930),
	(9130, 3222),
	(2230, 8268),
	(1211, 2354),
	(9237, 3643),
	(2912, 8471),
	(8783, 4977),
	(4325, 9566),
	(9355, 528),
	(9814, 9342),
	(1641, 6027),
	(3009, 8304),
	(4199, 2688),
	(7011, 9579),
	(8391, 8562),
	(1097, 5448),
	(1224, 5844),
	(5309, 2846),
	(7493, 8845),
	(3682, 48),
	(9165, 2755),
	(9959, 7420),
	(8158, 2616),
	(3210, 7795),
	(4418, 7790),
	(5592, 4184),
	(4111, 885),
	(742, 952),
	(2486, 6088),
	(6797, 271),
	(8829, 3005),
	(6444, 5818),
	(6566, 8783),
	(913, 2886),
	(2325, 1260),
	(4382, 3045),
	(5451, 1473),
	(9376, 8133),
	(9036, 4924),
	(5202, 7364),
	(9190, 5619),
	(8190, 2892),
	(9493, 500),
	(3043, 8315),
	(9220, 6396),
	(6400, 5692),
	(2709, 8547),
	(1218, 7403),
	(581, 117),
	(2577, 9373),
	(9349, 3186),
	(9021, 4874),
	(4207, 1781),
	(5201, 5305),
	(7889, 1996),
	(6327, 6377),
	(8120, 2338),
	(8213, 9072),
	(865, 6524),
	(5858, 5331),
	(1904, 3594),
	(9950, 8859),
	(518, 6551),
	(2674, 7081),
	(9848, 618),
	(5120, 5595),
	(259, 9662),
	(3077, 863),
	(4519, 7217),
	(3931, 6743),
	(2575, 6810),
	(1553, 5964),
	(4493, 3677)
];
