use balanced_slab::{generic::Order, AvlTreeMap, BstMap, RbTreeMap};

const KEYS: [i32; 11] = [50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45];

fn keys<'a>(it: impl Iterator<Item = (&'a i32, &'a ())>) -> Vec<i32> {
	it.map(|(k, _)| *k).collect()
}

#[test]
pub fn unbalanced_orders() {
	let map: BstMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();
	map.validate();
	assert_eq!(map.height(), 3);

	assert_eq!(
		keys(map.traverse(Order::Pre)),
		[50, 30, 20, 10, 25, 40, 35, 45, 70, 60, 80]
	);
	assert_eq!(
		keys(map.traverse(Order::In)),
		[10, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80]
	);
	assert_eq!(
		keys(map.traverse(Order::Post)),
		[10, 25, 20, 35, 45, 40, 30, 60, 80, 70, 50]
	);
	assert_eq!(keys(map.traverse(Order::Level)), KEYS);
}

#[test]
pub fn empty_orders() {
	let map: RbTreeMap<i32, ()> = RbTreeMap::new();

	for order in [Order::Pre, Order::In, Order::Post, Order::Level] {
		assert_eq!(map.traverse(order).next(), None);
		assert_eq!(map.traverse(order).len(), 0);
	}
}

fn check_orders(
	pre: Vec<i32>,
	in_order: Vec<i32>,
	post: Vec<i32>,
	level: Vec<i32>,
	root: i32,
) {
	let mut sorted = KEYS.to_vec();
	sorted.sort_unstable();
	assert_eq!(in_order, sorted);

	for order in [&pre, &post, &level] {
		let mut keys = order.clone();
		keys.sort_unstable();
		assert_eq!(keys, sorted);
	}

	assert_eq!(pre.first(), Some(&root));
	assert_eq!(level.first(), Some(&root));
	assert_eq!(post.last(), Some(&root));
}

#[test]
pub fn balanced_orders() {
	let rb: RbTreeMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();
	let avl: AvlTreeMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();
	rb.validate();
	avl.validate();

	let rb_root = *rb.traverse(Order::Level).next().unwrap().0;
	check_orders(
		keys(rb.traverse(Order::Pre)),
		keys(rb.traverse(Order::In)),
		keys(rb.traverse(Order::Post)),
		keys(rb.traverse(Order::Level)),
		rb_root,
	);

	let avl_root = *avl.traverse(Order::Level).next().unwrap().0;
	check_orders(
		keys(avl.traverse(Order::Pre)),
		keys(avl.traverse(Order::In)),
		keys(avl.traverse(Order::Post)),
		keys(avl.traverse(Order::Level)),
		avl_root,
	);

	// inserted in level order, already balanced: no rotation.
	assert_eq!(keys(avl.traverse(Order::Level)), KEYS);
}

#[test]
pub fn remove_keeps_order() {
	let mut rb: RbTreeMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();
	let mut avl: AvlTreeMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();
	let mut bst: BstMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();

	assert_eq!(rb.remove(&30), Some(()));
	assert_eq!(avl.remove(&30), Some(()));
	assert_eq!(bst.remove(&30), Some(()));

	rb.validate();
	avl.validate();
	bst.validate();

	let expected = [10, 20, 25, 35, 40, 45, 50, 60, 70, 80];
	assert_eq!(keys(rb.traverse(Order::In)), expected);
	assert_eq!(keys(avl.traverse(Order::In)), expected);
	assert_eq!(keys(bst.traverse(Order::In)), expected);

	// 30 is replaced by its successor.
	assert_eq!(
		keys(bst.traverse(Order::Pre)),
		[50, 35, 20, 10, 25, 40, 45, 70, 60, 80]
	);
}

#[test]
pub fn absent_remove_is_noop() {
	let mut rb: RbTreeMap<_, _> = KEYS.iter().map(|k| (*k, ())).collect();
	let before = keys(rb.traverse(Order::Pre));

	assert_eq!(rb.remove(&33), None);
	assert_eq!(rb.remove_entry(&1000), None);
	assert_eq!(keys(rb.traverse(Order::Pre)), before);
	assert_eq!(rb.len(), KEYS.len());

	let mut empty: AvlTreeMap<i32, ()> = AvlTreeMap::new();
	assert_eq!(empty.remove(&1), None);
	assert_eq!(empty.pop_first(), None);
	assert_eq!(empty.pop_last(), None);
	assert!(empty.is_empty());
}
