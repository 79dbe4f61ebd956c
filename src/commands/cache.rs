use crate::SourceArgs;

pub fn clear_cache(source: &SourceArgs) {
    source.project_cache().clear();
    println!("✓ Cache cleared");
}
