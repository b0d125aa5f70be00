mod reporting;
