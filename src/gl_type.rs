//! GL ES data types reported by active attribute/uniform queries

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlType {
    Float,
    FloatVec2,
    FloatVec3,
    FloatVec4,
    FloatMat2,
    FloatMat3,
    FloatMat4,
    Int,
    IntVec2,
    IntVec3,
    IntVec4,
    Bool,
    BoolVec2,
    BoolVec3,
    BoolVec4,
    Sampler2d,
    SamplerCube,
    /// raw enum value the driver reported
    Unknown(u32),
}

impl GlType {
    pub fn from_gl(value: u32) -> Self {
        match value {
            glow::FLOAT => GlType::Float,
            glow::FLOAT_VEC2 => GlType::FloatVec2,
            glow::FLOAT_VEC3 => GlType::FloatVec3,
            glow::FLOAT_VEC4 => GlType::FloatVec4,
            glow::FLOAT_MAT2 => GlType::FloatMat2,
            glow::FLOAT_MAT3 => GlType::FloatMat3,
            glow::FLOAT_MAT4 => GlType::FloatMat4,
            glow::INT => GlType::Int,
            glow::INT_VEC2 => GlType::IntVec2,
            glow::INT_VEC3 => GlType::IntVec3,
            glow::INT_VEC4 => GlType::IntVec4,
            glow::BOOL => GlType::Bool,
            glow::BOOL_VEC2 => GlType::BoolVec2,
            glow::BOOL_VEC3 => GlType::BoolVec3,
            glow::BOOL_VEC4 => GlType::BoolVec4,
            glow::SAMPLER_2D => GlType::Sampler2d,
            glow::SAMPLER_CUBE => GlType::SamplerCube,
            other => GlType::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GlType::Float => "float",
            GlType::FloatVec2 => "vec2f",
            GlType::FloatVec3 => "vec3f",
            GlType::FloatVec4 => "vec4f",
            GlType::FloatMat2 => "mat2f",
            GlType::FloatMat3 => "mat3f",
            GlType::FloatMat4 => "mat4f",
            GlType::Int => "int",
            GlType::IntVec2 => "vec2i",
            GlType::IntVec3 => "vec3i",
            GlType::IntVec4 => "vec4i",
            GlType::Bool => "bool",
            GlType::BoolVec2 => "vec2b",
            GlType::BoolVec3 => "vec3b",
            GlType::BoolVec4 => "vec4b",
            GlType::Sampler2d => "sampler2d",
            GlType::SamplerCube => "samplerCube",
            GlType::Unknown(_) => "unknown type",
        }
    }
}

impl fmt::Display for GlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
