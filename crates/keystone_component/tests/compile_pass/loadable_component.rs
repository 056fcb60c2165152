use keystone_component::{Component, HookError, Loadable, Shared};

#[derive(Default, Component)]
#[component(loadable)]
struct Database {
    url: String,
}

impl Loadable for Database {
    fn load(&mut self) -> Result<(), HookError> {
        self.url = "postgres://localhost".into();
        Ok(())
    }
}

#[derive(Default, Component)]
struct App {
    database: Shared<Database>,
}

fn main() {
    let mut app = App::default();
    keystone_component::load(&mut app).unwrap();
    assert_eq!(app.database.read().unwrap().url, "postgres://localhost");
}
