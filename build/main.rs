use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
    let dest = env::var("OUT_DIR").unwrap();
    let mut file = File::create(Path::new(&dest).join("gl_bindings.rs")).unwrap();

    // 3.3 core is the baseline: framebuffer objects, separate read/draw
    // binding points and framebuffer blit are all core by then.
    Registry::new(Api::Gl, (3, 3), Profile::Core, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut file)
        .unwrap();
}
