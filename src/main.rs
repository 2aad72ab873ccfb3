fn main() -> anyhow::Result<()> {
    class_filter::run()
}
