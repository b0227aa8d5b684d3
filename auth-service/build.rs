fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server for the service itself, client for IntrospectionClient
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/auth.proto"], &["../proto"])?;

    Ok(())
}
