use std::{convert::TryInto, path::Path};

use anyhow::Context;

use crate::{
    camera::{self, Camera},
    core::{loader::InputParams, scene::Scene, store::ObjectStoreBuilder},
    material::{self, MaterialRegistry},
    primitive::{self, GeometryRegistry},
};

pub struct LoadedScene {
    pub scene: Scene,
    pub camera: Option<Camera>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> anyhow::Result<LoadedScene> {
    let path = path.as_ref();
    let json_file = std::fs::File::open(path)
        .with_context(|| format!("scene - can't open '{}'", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)
        .with_context(|| format!("scene - '{}' is not valid json", path.display()))?;

    let loaded = scene_from_value(&json_value)?;
    log::info!(
        "loaded scene '{}': {} geometries, {} materials",
        path.display(),
        loaded.scene.geometries().len(),
        loaded.scene.materials().len()
    );
    Ok(loaded)
}

pub fn scene_from_value(json_value: &serde_json::Value) -> anyhow::Result<LoadedScene> {
    let material_value = json_value
        .get("materials")
        .context("scene - There is no 'materials' field")?;
    let materials = load_slots(
        material_value,
        "json-materials",
        MaterialRegistry::builder,
        &material::create_material_from_params,
    )?;

    let geometry_value = json_value
        .get("geometries")
        .context("scene - There is no 'geometries' field")?;
    let geometries = load_slots(
        geometry_value,
        "json-geometries",
        GeometryRegistry::builder,
        &primitive::create_geometry_from_params,
    )?;

    let camera = match json_value.get("camera") {
        Some(camera_value) => {
            let mut params: InputParams = camera_value.try_into()?;
            Some(camera::create_camera_from_params(&mut params)?)
        }
        None => None,
    };

    let scene = Scene::new(
        GeometryRegistry::new(geometries.build()?),
        MaterialRegistry::new(materials.build()?),
    )?;

    Ok(LoadedScene { scene, camera })
}

/// Each array entry lands in its `slot`, or in its array position when absent.
fn load_slots<T, B, F, const CAP: usize>(
    value: &serde_json::Value,
    env: &str,
    builder: B,
    create: &F,
) -> anyhow::Result<ObjectStoreBuilder<T, CAP>>
where
    T: Copy,
    B: Fn(usize) -> anyhow::Result<ObjectStoreBuilder<T, CAP>>,
    F: Fn(&mut InputParams) -> anyhow::Result<T>,
{
    let arr = value
        .as_array()
        .with_context(|| format!("{} - should be an array", env))?;
    let mut builder = builder(arr.len()).with_context(|| env.to_owned())?;
    for (index, item) in arr.iter().enumerate() {
        let mut params: InputParams = item
            .try_into()
            .with_context(|| format!("{} - element {}", env, index))?;
        let slot = params.get_index_or("slot", index)?;
        let object = create(&mut params)?;
        params.check_unused_keys();
        builder
            .construct(slot, object)
            .with_context(|| format!("{} - element {}", env, index))?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::GeometryT;

    const DEMO: &str = r#"{
        "camera": { "type": "perspective", "eye": [0, 5, 15], "forward": [0, 0, -1], "fov": 90 },
        "materials": [
            { "type": "phong", "diffuse": [1, 0, 0], "reflectiveness": 0.25 },
            { "type": "phong", "diffuse": [0, 0, 1], "reflectiveness": 0.25 },
            { "type": "checker", "scale": 0.1, "reflectiveness": 0.5 }
        ],
        "geometries": [
            { "slot": 2, "type": "plane", "normal": [0, 1, 0], "offset": 0, "material": 2 },
            { "slot": 0, "type": "sphere", "center": [-15, 15, -10], "radius": 15, "material": 0 },
            { "slot": 1, "type": "sphere", "center": [12, 10, -10], "radius": 10, "material": 1 }
        ]
    }"#;

    fn parse(text: &str) -> anyhow::Result<LoadedScene> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        scene_from_value(&value)
    }

    #[test]
    fn demo_scene_file_matches_builtin() {
        let loaded = parse(DEMO).unwrap();
        let builtin = Scene::demo().unwrap();
        assert!(loaded.camera.is_some());
        for index in 0..3 {
            assert_eq!(
                loaded.scene.geometries().get(index),
                builtin.geometries().get(index)
            );
            assert_eq!(
                loaded.scene.materials().reflectiveness(index),
                builtin.materials().reflectiveness(index)
            );
        }
        assert_eq!(loaded.scene.geometries().get(2).material(), 2);
    }

    #[test]
    fn duplicate_slot_is_rejected() {
        let text = r#"{
            "materials": [ { "type": "checker" }, { "slot": 0, "type": "checker" } ],
            "geometries": []
        }"#;
        assert!(parse(text).is_err());
    }

    #[test]
    fn dangling_material_id_is_rejected() {
        let text = r#"{
            "materials": [ { "type": "checker" } ],
            "geometries": [ { "type": "plane", "normal": [0, 1, 0], "material": 3 } ]
        }"#;
        assert!(parse(text).is_err());
    }

    #[test]
    fn missing_sections_are_reported() {
        let err = parse(r#"{ "materials": [] }"#).err().unwrap().to_string();
        assert!(err.contains("geometries"));
    }

    #[test]
    fn scene_without_camera_loads() {
        let text = r#"{
            "materials": [ { "type": "checker", "reflectiveness": 0.5 } ],
            "geometries": [ { "type": "plane", "normal": [0, 1, 0], "material": 0 } ]
        }"#;
        let loaded = parse(text).unwrap();
        assert!(loaded.camera.is_none());
        assert_eq!(loaded.scene.materials().reflectiveness(0), 0.5);
    }

    #[test]
    fn oversized_ids_are_rejected() {
        let material_id = r#"{
            "materials": [ { "type": "checker" }, { "type": "checker" } ],
            "geometries": [ { "type": "plane", "normal": [0, 1, 0], "material": 4294967297 } ]
        }"#;
        assert!(parse(material_id).is_err());

        let slot = r#"{
            "materials": [ { "slot": 4294967296, "type": "checker" } ],
            "geometries": []
        }"#;
        assert!(parse(slot).is_err());
    }
}
