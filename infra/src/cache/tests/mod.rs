mod redis_client_tests;
mod verification_cache_tests;
