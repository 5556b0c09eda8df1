mod user_tests;
