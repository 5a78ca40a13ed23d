mod extraction_tier_tests;
