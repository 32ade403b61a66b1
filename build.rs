fn main() {
    #[cfg(windows)]
    {
        let mut res = tauri_winres::WindowsResource::new();
        // version block only; icons are loaded from disk at runtime
        res.set("FileDescription", "Toast build-status overlay");
        res.set("ProductName", "Toast");
        res.compile().expect("Failed to compile resources");
    }
}
