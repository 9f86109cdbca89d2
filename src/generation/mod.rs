/// Script and video metadata generation
///
/// Both generators treat the model as an opaque "prompt in, JSON record out"
/// capability and persist what they produce.

pub mod roteiro;
pub mod youtube;

pub use roteiro::ScriptGenerator;
pub use youtube::VideoDetailGenerator;
