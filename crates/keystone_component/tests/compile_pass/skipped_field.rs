use keystone_component::Component;

/// Not `Reflect`; must be skipped to derive.
struct Socket;

#[derive(Component)]
struct Listener {
    #[component(skip)]
    socket: Socket,
    port: u16,
}

fn main() {
    let mut listener = Listener {
        socket: Socket,
        port: 8080,
    };
    keystone_component::load(&mut listener).unwrap();
    let Socket = listener.socket;
    assert_eq!(listener.port, 8080);
}
