fn main() -> std::process::ExitCode {
    cfgbackup::run()
}
