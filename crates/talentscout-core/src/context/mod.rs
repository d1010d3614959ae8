mod transcript;
mod persona;
mod shaper;

pub use transcript::Transcript;
pub use persona::Persona;
pub use shaper::{shape_request, ShapedRequest};
