use balanced_slab::{AvlTreeMap, BstMap, RbTreeMap};
use std::{cell::Cell, rc::Rc};

#[test]
pub fn iter() {
	let mut map = RbTreeMap::new();
	for i in (0..10).rev() {
		map.insert(i, i);
	}

	let mut i = 0;
	for (key, value) in &map {
		assert_eq!(*key, i);
		assert_eq!(*value, i);
		i += 1;
	}

	assert_eq!(i, 10)
}

#[test]
pub fn iter_both_ends() {
	let map: AvlTreeMap<_, _> = (0..10).map(|i| (i, i * 2)).collect();

	let mut it = map.iter();
	assert_eq!(it.len(), 10);
	assert_eq!(it.next(), Some((&0, &0)));
	assert_eq!(it.next_back(), Some((&9, &18)));
	assert_eq!(it.len(), 8);

	let middle: Vec<_> = it.map(|(k, _)| *k).collect();
	assert_eq!(middle, [1, 2, 3, 4, 5, 6, 7, 8]);

	let keys: Vec<_> = map.keys().rev().cloned().collect();
	assert_eq!(keys, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);

	let values: Vec<_> = map.values().cloned().collect();
	assert_eq!(values, [0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
}

#[test]
pub fn iter_mut() {
	let mut map: BstMap<_, _> = (0..10).map(|i| (i, i)).collect();

	for (key, value) in map.iter_mut().rev() {
		*value += key * 10;
	}

	for value in map.values_mut() {
		*value += 1;
	}

	for (key, value) in &map {
		assert_eq!(*value, key * 11 + 1);
	}
}

#[test]
pub fn into_iter() {
	struct Element {
		/// Drop counter.
		counter: Rc<Cell<usize>>,
		value: i32,
	}

	impl Element {
		pub fn new(counter: &Rc<Cell<usize>>, value: i32) -> Self {
			Element {
				counter: counter.clone(),
				value,
			}
		}

		pub fn inner(&self) -> i32 {
			self.value
		}
	}

	impl Drop for Element {
		fn drop(&mut self) {
			let c = self.counter.get();
			self.counter.set(c + 1);
		}
	}

	let counter = Rc::new(Cell::new(0));
	let mut map = RbTreeMap::new();
	for i in 0..100 {
		map.insert(i, Element::new(&counter, i));
	}

	let mut expected = 0;
	for (key, value) in map {
		assert_eq!(key, value.inner());
		assert_eq!(key, expected);
		expected += 1;
	}

	assert_eq!(counter.get(), 100);
}

#[test]
pub fn into_iter_partially_consumed() {
	let counter = Rc::new(Cell::new(0));

	struct Counted(Rc<Cell<usize>>);

	impl Drop for Counted {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	let mut map = AvlTreeMap::new();
	for i in 0..50 {
		map.insert(i, Counted(counter.clone()));
	}

	for i in 0..10 {
		map.remove(&i);
	}
	assert_eq!(counter.get(), 10);

	let mut it = map.into_iter();
	assert_eq!(it.next().map(|(k, _)| k), Some(10));
	assert_eq!(it.next_back().map(|(k, _)| k), Some(49));
	assert_eq!(counter.get(), 12);

	drop(it);
	assert_eq!(counter.get(), 50);
}

#[test]
pub fn dropping_the_map_drops_every_value() {
	let counter = Rc::new(Cell::new(0));

	struct Counted(Rc<Cell<usize>>);

	impl Drop for Counted {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	let mut map = RbTreeMap::new();
	for i in 0..64 {
		map.insert(i, Counted(counter.clone()));
	}

	map.insert(3, Counted(counter.clone()));
	assert_eq!(counter.get(), 1);

	drop(map);
	assert_eq!(counter.get(), 65);
}
