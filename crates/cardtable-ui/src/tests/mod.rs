mod sectioned_table_tests;
