mod checker;
mod phong;

pub use checker::*;
pub use phong::*;

use crate::core::{
    color::Color,
    loader::InputParams,
    ray::Ray,
    store::{ObjectStore, ObjectStoreBuilder, OBJECT_SLOT_SIZE},
};

pub const MAX_MATERIALS: usize = 16;

#[enum_dispatch::enum_dispatch(Material)]
pub trait MaterialT: Send + Sync {
    fn sample(&self, ray: &Ray, position: glam::Vec3A, normal: glam::Vec3A) -> Color;

    /// Share of the appearance taken from the mirror bounce, in [0, 1].
    fn reflectiveness(&self) -> f32;
}

#[enum_dispatch::enum_dispatch]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Material {
    Phong,
    Checker,
}

const _: () = assert!(std::mem::size_of::<Material>() <= OBJECT_SLOT_SIZE);

#[derive(Copy, Clone)]
pub struct MaterialRegistry {
    materials: ObjectStore<Material, MAX_MATERIALS>,
}

impl MaterialRegistry {
    pub fn new(materials: ObjectStore<Material, MAX_MATERIALS>) -> Self {
        Self { materials }
    }

    pub fn builder(count: usize) -> anyhow::Result<ObjectStoreBuilder<Material, MAX_MATERIALS>> {
        ObjectStoreBuilder::new(count)
    }

    pub fn from_materials<I: IntoIterator<Item = Material>>(materials: I) -> anyhow::Result<Self> {
        Ok(Self::new(ObjectStore::from_values(materials)?))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// `material_id` must come from a hit on a validated scene.
    pub fn sample(
        &self,
        material_id: usize,
        ray: &Ray,
        position: glam::Vec3A,
        normal: glam::Vec3A,
    ) -> Color {
        self.materials.get(material_id).sample(ray, position, normal)
    }

    pub fn reflectiveness(&self, material_id: usize) -> f32 {
        self.materials.get(material_id).reflectiveness()
    }
}

pub fn create_material_from_params(params: &mut InputParams) -> anyhow::Result<Material> {
    params.set_name("material".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("material-{}", ty).into());

    let res = match ty.as_str() {
        "phong" => Phong::load(params)?.into(),
        "checker" => Checker::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}
