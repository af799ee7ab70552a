fn main() {
    built::write_built_file().expect("build-time information should be writable");
}
