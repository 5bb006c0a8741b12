mod embedder_factory_test;
