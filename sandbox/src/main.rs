use boreal_assets::importers::{ObjModelImporter, PngTextureImporter};
use boreal_assets::{AssetCatalog, ImportInput, ModelData, TextureData};
use boreal_core::asset::AssetLocation;
use boreal_core::ecs::Signature;
use boreal_ecs::{
    Camera, ComponentManager, ComponentTuple, Coordinator, EntitySet, QuerySystem, Transform,
};

/// Spins every entity that has a transform around the Y axis.
struct SpinSystem;

impl QuerySystem for SpinSystem {
    fn matches(components: &ComponentManager, signature: &Signature) -> bool {
        <(Transform,)>::signature(components)
            .map(|mask| signature.contains_all(&mask))
            .unwrap_or(false)
    }

    fn update(&mut self, coordinator: &mut Coordinator, dt: f32, entities: &EntitySet) {
        let half = 0.5 * dt;
        let (sin, cos) = half.sin_cos();
        for &entity in entities {
            let transform = coordinator.get_component_mut::<Transform>(entity).unwrap();
            // Quaternion multiply by a yaw rotation (0, sin, 0, cos).
            let [x, y, z, w] = transform.rotation;
            transform.rotation = [
                x * cos - z * sin,
                y * cos + w * sin,
                z * cos + x * sin,
                w * cos - y * sin,
            ];
        }
    }
}

fn main() {
    env_logger::init();

    // --- ECS: a camera and a few spinning props ---
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Transform>().unwrap();
    coordinator.register_component::<Camera>().unwrap();
    coordinator.register_query_system(SpinSystem).unwrap();

    let camera = coordinator.create_entity().unwrap();
    coordinator
        .add_component(camera, Transform::from_translation([0.0, 2.0, 5.0]))
        .unwrap();
    coordinator
        .add_component(camera, Camera::default_perspective())
        .unwrap();

    for i in 0..3 {
        let prop = coordinator.create_entity().unwrap();
        coordinator
            .add_component(prop, Transform::from_translation([i as f32 * 2.0, 0.0, 0.0]))
            .unwrap();
    }

    for _frame in 0..3 {
        coordinator
            .run_query_system::<SpinSystem>(1.0 / 60.0)
            .unwrap();
    }
    println!(
        "{} entities alive, {} with a camera",
        coordinator.living_entity_count(),
        coordinator.entities_with::<(Camera,)>().unwrap().len()
    );

    // --- Assets: import whatever was passed on the command line ---
    let mut catalog = AssetCatalog::new();
    catalog.register_importer::<TextureData, _>(PngTextureImporter, 100);
    catalog.register_importer::<ModelData, _>(ObjModelImporter, 100);

    for path in std::env::args().skip(1) {
        let name = std::path::Path::new(&path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("asset");
        let location = match AssetLocation::parse(name) {
            Ok(location) => location,
            Err(error) => {
                log::error!("{error}");
                continue;
            }
        };
        let reference = catalog.import_asset(location, ImportInput::file(&path));
        match reference.lock() {
            Some(handle) => {
                let metadata = handle.metadata();
                println!(
                    "imported '{}' as {} ({})",
                    metadata.location, metadata.id, metadata.type_name
                );
            }
            None => println!("failed to import '{path}'"),
        }
    }
    println!("{} asset(s) in the catalog", catalog.asset_count());
}
