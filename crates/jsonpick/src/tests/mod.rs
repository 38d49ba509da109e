mod property_extract;
