use keystone_component::{Component, Shared};

#[derive(Default, Component)]
struct Marker;

#[derive(Default, Component)]
struct Pair(Shared<Marker>, Shared<Marker>);

fn main() {
    let mut pair = Pair::default();
    keystone_component::load(&mut pair).unwrap();
    assert!(pair.0.ptr_eq(&pair.1));
}
